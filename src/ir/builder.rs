//! Append-only IR builder
//!
//! Emits typed commands into an internal buffer, type-checking each
//! emission. A malformed emission logs a diagnostic and returns an invalid
//! value reference, leaving the buffer unchanged. In analysis (dry-run) mode
//! the builder returns fresh negative-id references without recording
//! anything; both id spaces advance the same counter, so dry runs allocate
//! identities deterministically.

use tracing::{debug, error};

use crate::ir::command::{Command, CommandData, IcmpPredicate, Opcode, ValueRef};
use crate::ir::types::IrType;

/// Builder over one command stream
#[derive(Debug, Default)]
pub struct IrBuilder {
    next_id: i32,
    commands: Vec<Command>,
    ignore_writes: bool,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            commands: Vec::new(),
            ignore_writes: false,
        }
    }

    /// Enable or disable analysis mode
    pub fn set_ignore_writes(&mut self, ignore: bool) {
        self.ignore_writes = ignore;
    }

    pub fn ignore_writes(&self) -> bool {
        self.ignore_writes
    }

    /// The recorded command stream, in emission order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    fn emit(&mut self, op: Opcode, ty: IrType, args: Vec<ValueRef>) -> ValueRef {
        self.emit_with_data(op, ty, args, CommandData::None)
    }

    fn emit_with_data(
        &mut self,
        op: Opcode,
        ty: IrType,
        args: Vec<ValueRef>,
        data: CommandData,
    ) -> ValueRef {
        if self.ignore_writes {
            // Analysis mode: hand out a sentinel without recording anything.
            let id = -self.next_id;
            self.next_id += 1;
            return ValueRef::new(id, ty);
        }

        let result = if ty.is_void() {
            ValueRef::invalid()
        } else {
            let id = self.next_id;
            self.next_id += 1;
            ValueRef::new(id, ty)
        };

        self.commands
            .push(Command::with_data(op, result.clone(), args, data));
        result
    }

    // Constants

    pub fn const_i32(&mut self, value: i32) -> ValueRef {
        self.emit_with_data(
            Opcode::Const,
            IrType::I32,
            vec![],
            CommandData::Int(value as i64),
        )
    }

    pub fn const_i64(&mut self, value: i64) -> ValueRef {
        self.emit_with_data(Opcode::Const, IrType::I64, vec![], CommandData::Int(value))
    }

    pub fn const_bool(&mut self, value: bool) -> ValueRef {
        self.emit_with_data(Opcode::Const, IrType::Bool, vec![], CommandData::Bool(value))
    }

    pub fn const_f32(&mut self, value: f32) -> ValueRef {
        self.emit_with_data(
            Opcode::Const,
            IrType::F32,
            vec![],
            CommandData::Float(value as f64),
        )
    }

    pub fn const_f64(&mut self, value: f64) -> ValueRef {
        self.emit_with_data(Opcode::Const, IrType::F64, vec![], CommandData::Float(value))
    }

    /// Null constant of a pointer type
    pub fn const_null(&mut self, ptr_type: IrType) -> ValueRef {
        if !ptr_type.is_pointer() {
            error!(target: "codegen", "const_null requires a pointer type, got {}", ptr_type);
            return ValueRef::invalid();
        }
        self.emit_with_data(Opcode::Const, ptr_type, vec![], CommandData::Int(0))
    }

    // Arithmetic

    fn arith(&mut self, op: Opcode, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        if lhs.ty != rhs.ty {
            error!(
                target: "codegen",
                "type mismatch in {} operation: {} vs {}", op, lhs.ty, rhs.ty
            );
            return ValueRef::invalid();
        }
        let ty = lhs.ty.clone();
        self.emit(op, ty, vec![lhs, rhs])
    }

    pub fn add(&mut self, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        self.arith(Opcode::Add, lhs, rhs)
    }

    pub fn sub(&mut self, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        self.arith(Opcode::Sub, lhs, rhs)
    }

    pub fn mul(&mut self, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        self.arith(Opcode::Mul, lhs, rhs)
    }

    pub fn div(&mut self, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        self.arith(Opcode::Div, lhs, rhs)
    }

    // Comparison

    pub fn icmp(&mut self, predicate: IcmpPredicate, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        if lhs.ty != rhs.ty {
            error!(
                target: "codegen",
                "type mismatch in icmp operation: {} vs {}", lhs.ty, rhs.ty
            );
            return ValueRef::invalid();
        }
        self.emit_with_data(
            Opcode::ICmp,
            IrType::Bool,
            vec![lhs, rhs],
            CommandData::Predicate(predicate),
        )
    }

    // Logical

    pub fn and(&mut self, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        if !lhs.ty.is_bool() || !rhs.ty.is_bool() {
            error!(target: "codegen", "logical and requires boolean operands");
            return ValueRef::invalid();
        }
        self.emit(Opcode::And, IrType::Bool, vec![lhs, rhs])
    }

    pub fn or(&mut self, lhs: ValueRef, rhs: ValueRef) -> ValueRef {
        if !lhs.ty.is_bool() || !rhs.ty.is_bool() {
            error!(target: "codegen", "logical or requires boolean operands");
            return ValueRef::invalid();
        }
        self.emit(Opcode::Or, IrType::Bool, vec![lhs, rhs])
    }

    pub fn not(&mut self, operand: ValueRef) -> ValueRef {
        if !operand.ty.is_bool() {
            error!(
                target: "codegen",
                "logical not requires a boolean operand, got {}", operand.ty
            );
            return ValueRef::invalid();
        }
        self.emit(Opcode::Not, IrType::Bool, vec![operand])
    }

    // Memory

    /// Stack slot of `ty`; yields `ptr_to(ty)`, payload carries the type name
    pub fn alloca(&mut self, ty: IrType) -> ValueRef {
        let name = ty.to_string();
        self.emit_with_data(
            Opcode::Alloca,
            IrType::ptr_to(ty),
            vec![],
            CommandData::Str(name),
        )
    }

    pub fn store(&mut self, value: ValueRef, ptr: ValueRef) {
        if !ptr.ty.is_pointer() {
            error!(target: "codegen", "store target must be a pointer, got {}", ptr.ty);
            return;
        }
        self.emit(Opcode::Store, IrType::Void, vec![value, ptr]);
    }

    pub fn load(&mut self, ptr: ValueRef, ty: IrType) -> ValueRef {
        if !ptr.ty.is_pointer() {
            error!(target: "codegen", "load source must be a pointer, got {}", ptr.ty);
            return ValueRef::invalid();
        }
        self.emit(Opcode::Load, ty, vec![ptr])
    }

    /// Address computation; the payload carries the comma-joined indices
    pub fn gep(&mut self, ptr: ValueRef, indices: &[i32], result_type: IrType) -> ValueRef {
        if !ptr.ty.is_pointer() {
            error!(target: "codegen", "gep requires a pointer operand, got {}", ptr.ty);
            return ValueRef::invalid();
        }
        let joined = indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.emit_with_data(Opcode::Gep, result_type, vec![ptr], CommandData::Str(joined))
    }

    // Control flow

    pub fn ret(&mut self, value: ValueRef) {
        self.emit(Opcode::Ret, IrType::Void, vec![value]);
    }

    pub fn ret_void(&mut self) {
        self.emit(Opcode::RetVoid, IrType::Void, vec![]);
    }

    pub fn label(&mut self, name: &str) {
        self.emit_with_data(
            Opcode::Label,
            IrType::Void,
            vec![],
            CommandData::Str(name.to_string()),
        );
    }

    pub fn br(&mut self, target_label: &str) {
        self.emit_with_data(
            Opcode::Br,
            IrType::Void,
            vec![],
            CommandData::Str(target_label.to_string()),
        );
    }

    /// Conditional branch; the payload carries `"true_label,false_label"`
    pub fn br_cond(&mut self, condition: ValueRef, true_label: &str, false_label: &str) {
        if !condition.ty.is_bool() {
            error!(
                target: "codegen",
                "conditional branch condition must be boolean, got {}", condition.ty
            );
            return;
        }
        let labels = format!("{},{}", true_label, false_label);
        self.emit_with_data(
            Opcode::BrCond,
            IrType::Void,
            vec![condition],
            CommandData::Str(labels),
        );
    }

    /// True iff the last non-label command is a terminator. Labels alone are
    /// never terminators; an empty buffer has no terminator.
    pub fn has_terminator(&self) -> bool {
        for cmd in self.commands.iter().rev() {
            if cmd.op == Opcode::Label {
                continue;
            }
            return cmd.op.is_terminator();
        }
        false
    }

    // Functions

    /// Opens a function; the payload is `name:return_type[:param1,param2,…]`
    pub fn function_begin(&mut self, name: &str, return_type: IrType, param_types: &[IrType]) {
        let mut signature = format!("{}:{}", name, return_type);
        if !param_types.is_empty() {
            signature.push(':');
            let params = param_types
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(",");
            signature.push_str(&params);
        }
        self.emit_with_data(
            Opcode::FunctionBegin,
            IrType::Void,
            vec![],
            CommandData::Str(signature),
        );
    }

    pub fn function_end(&mut self) {
        self.emit(Opcode::FunctionEnd, IrType::Void, vec![]);
    }

    pub fn call(&mut self, function_name: &str, return_type: IrType, args: Vec<ValueRef>) -> ValueRef {
        self.emit_with_data(
            Opcode::Call,
            return_type,
            args,
            CommandData::Str(function_name.to_string()),
        )
    }

    /// Log the command stream for debugging
    pub fn dump_commands(&self) {
        debug!(target: "codegen", "command stream ({} commands)", self.commands.len());
        for (i, cmd) in self.commands.iter().enumerate() {
            debug!(target: "codegen", "[{}] {}", i, cmd);
        }
    }
}
