// -*- coding: utf-8 -*-
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Execution context markers and interrupt safe cells.
//!
//! The engine runs in exactly two contexts: the timer interrupt and the
//! foreground polling loop. Functions that may only run in one of them take
//! the matching marker by reference. Holding a marker proves the caller runs
//! in that context.

use core::cell::Cell;

pub use critical_section::{CriticalSection, Mutex};

macro_rules! define_context {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub struct $name<'cs>(CriticalSection<'cs>);

        impl<'cs> $name<'cs> {
            /// Create a new context.
            ///
            /// # Safety
            ///
            /// This may only be called from the corresponding context.
            /// `MainCtx` may only be constructed from `main()`
            /// and `IrqCtx` may only be constructed from ISRs.
            #[inline(always)]
            pub unsafe fn new() -> Self {
                // SAFETY: This cs is only handed to `MutexCell` accesses.
                //         The IRQ safety is upheld by the context machinery:
                //         a function taking a `MainCtx` can only be called from
                //         `main()` and a function taking an `IrqCtx` only from an
                //         ISR. The main context does single byte accesses with
                //         this cs and opens a real critical section for anything
                //         wider. On AVR ISRs do not nest.
                let cs = unsafe { CriticalSection::new() };
                fence();
                Self(cs)
            }

            /// Get the `CriticalSection` that belongs to this context.
            #[inline(always)]
            pub fn cs(&self) -> CriticalSection<'cs> {
                self.0
            }
        }

        impl Drop for $name<'_> {
            #[inline(always)]
            fn drop(&mut self) {
                fence();
            }
        }
    };
}

define_context!(
    /// Foreground (polling loop) context.
    MainCtx
);
define_context!(
    /// Timer interrupt context.
    IrqCtx
);

/// Optimization and reordering fence.
#[inline(always)]
pub fn fence() {
    core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
}

/// A `Copy` value shared between the interrupt and the main context.
pub struct MutexCell<T> {
    inner: Mutex<Cell<T>>,
}

impl<T> MutexCell<T> {
    #[inline]
    pub const fn new(inner: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new(inner)),
        }
    }

    #[inline]
    pub fn replace(&self, cs: CriticalSection<'_>, inner: T) -> T {
        self.inner.borrow(cs).replace(inner)
    }
}

impl<T: Copy> MutexCell<T> {
    #[inline]
    pub fn get(&self, cs: CriticalSection<'_>) -> T {
        self.inner.borrow(cs).get()
    }

    #[inline]
    pub fn set(&self, cs: CriticalSection<'_>, inner: T) {
        self.inner.borrow(cs).set(inner);
    }

    /// Read-modify-write `f` on the value. Returns the new value.
    #[inline]
    pub fn update(&self, cs: CriticalSection<'_>, f: impl FnOnce(T) -> T) -> T {
        let cell = self.inner.borrow(cs);
        let new = f(cell.get());
        cell.set(new);
        new
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cell_update() {
        let cell = MutexCell::new(3_u8);
        critical_section::with(|cs| {
            assert_eq!(cell.update(cs, |v| v << 1), 6);
            assert_eq!(cell.get(cs), 6);
            assert_eq!(cell.replace(cs, 1), 6);
            cell.set(cs, cell.get(cs) + 1);
            assert_eq!(cell.get(cs), 2);
        });
    }

    #[test]
    fn test_ctx_cs() {
        // SAFETY: Tests are the only context and there are no interrupts.
        let m = unsafe { MainCtx::new() };
        let cell = MutexCell::new(0x5A_u8);
        assert_eq!(cell.get(m.cs()), 0x5A);
    }
}

// vim: ts=4 sw=4 expandtab
