//! IR type representation
//!
//! These types describe values in the linear command stream and are separate
//! from both AST type names and symbol-table display names.

use std::fmt;
use std::sync::Arc;

/// A type in the IR value model
#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    I8,
    I16,
    I32,
    I64,
    Bool,
    F32,
    F64,
    Void,
    /// Untyped pointer
    Ptr,
    /// Pointer with a known pointee
    PtrTo(Box<IrType>),
    /// Aggregate with a computed layout
    Struct(Arc<StructLayout>),
}

impl IrType {
    /// Pointer to `inner`
    pub fn ptr_to(inner: IrType) -> IrType {
        IrType::PtrTo(Box::new(inner))
    }

    /// Struct type from a finished layout
    pub fn struct_type(layout: StructLayout) -> IrType {
        IrType::Struct(Arc::new(layout))
    }

    /// Any pointer, typed or not
    pub fn is_pointer(&self) -> bool {
        matches!(self, IrType::Ptr | IrType::PtrTo(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, IrType::Bool)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, IrType::Void)
    }

    /// The pointee of a typed pointer
    pub fn pointee(&self) -> Option<&IrType> {
        match self {
            IrType::PtrTo(inner) => Some(inner),
            _ => None,
        }
    }

    /// Size in bytes; pointers are 8
    pub fn size_of(&self) -> u64 {
        match self {
            IrType::I8 | IrType::Bool => 1,
            IrType::I16 => 2,
            IrType::I32 | IrType::F32 => 4,
            IrType::I64 | IrType::F64 => 8,
            IrType::Void => 0,
            IrType::Ptr | IrType::PtrTo(_) => 8,
            IrType::Struct(layout) => layout.size,
        }
    }

    /// Natural alignment in bytes
    pub fn align_of(&self) -> u64 {
        match self {
            IrType::Void => 1,
            IrType::Struct(layout) => layout.align.max(1),
            other => other.size_of().max(1),
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::I8 => write!(f, "i8"),
            IrType::I16 => write!(f, "i16"),
            IrType::I32 => write!(f, "i32"),
            IrType::I64 => write!(f, "i64"),
            IrType::Bool => write!(f, "bool"),
            IrType::F32 => write!(f, "f32"),
            IrType::F64 => write!(f, "f64"),
            IrType::Void => write!(f, "void"),
            // Pointers are opaque on the wire
            IrType::Ptr | IrType::PtrTo(_) => write!(f, "ptr"),
            IrType::Struct(layout) => write!(f, "{}", layout.name),
        }
    }
}

/// One field of a struct layout
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    pub ty: IrType,
    /// Byte offset from the start of the struct
    pub offset: u64,
}

/// Aggregate layout attached to struct-typed values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructLayout {
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<StructField>,
    /// Total size including trailing padding
    pub size: u64,
    pub align: u64,
}

impl StructLayout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            size: 0,
            align: 0,
        }
    }

    /// Append a field; its offset is assigned by [`StructLayout::calculate_layout`]
    pub fn add_field(&mut self, name: impl Into<String>, ty: IrType) {
        self.fields.push(StructField {
            name: name.into(),
            ty,
            offset: 0,
        });
    }

    /// Field lookup by name
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Index of a field by name
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Assign field offsets honoring natural alignment and compute the
    /// padded total size
    pub fn calculate_layout(&mut self) {
        let mut offset = 0u64;
        let mut align = 1u64;
        for field in &mut self.fields {
            let field_align = field.ty.align_of();
            offset = round_up(offset, field_align);
            field.offset = offset;
            offset += field.ty.size_of();
            align = align.max(field_align);
        }
        self.align = align;
        self.size = round_up(offset, align);
    }
}

fn round_up(value: u64, align: u64) -> u64 {
    debug_assert!(align > 0);
    value.div_ceil(align) * align
}
