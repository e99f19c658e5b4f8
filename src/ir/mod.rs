//! Typed three-address IR: value model, command stream, and builder

mod builder;
mod command;
mod types;

pub use builder::IrBuilder;
pub use command::{Command, CommandData, IcmpPredicate, Opcode, ValueRef};
pub use types::{IrType, StructField, StructLayout};
