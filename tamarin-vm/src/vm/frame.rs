// tamarin-vm - Call frames for the Tamarin VM
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Call frames for the VM.

use std::rc::Rc;

use tamarin_core::code::Instructions;
use tamarin_core::object::Closure;

/// A call frame on the VM's frame stack.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The closure being executed.
    closure: Rc<Closure>,

    /// Instruction pointer. Starts at -1: the fetch loop pre-increments
    /// before reading, and jump targets are assigned accordingly.
    pub ip: i64,

    /// Index of the first local slot of this frame within the value stack.
    pub base_pointer: usize,
}

impl Frame {
    /// Create a new frame for a closure whose locals start at `base_pointer`.
    pub fn new(closure: Rc<Closure>, base_pointer: usize) -> Self {
        Frame {
            closure,
            ip: -1,
            base_pointer,
        }
    }

    /// The closure this frame runs.
    #[inline]
    pub fn closure(&self) -> &Rc<Closure> {
        &self.closure
    }

    /// The instructions of the frame's function.
    #[inline]
    pub fn instructions(&self) -> &Instructions {
        &self.closure.func.instructions
    }
}
