//! The device-under-test capability.
//!
//! A design model is anything that can re-settle its state on demand. Each
//! model is built against one [`SimContext`](crate::context::SimContext),
//! keeps a shared reference to it for its whole life, and raises the finish
//! flag through that reference when its testbench logic decides the run is
//! over. The borrow ties the model's lifetime to the context, so a model can
//! never outlive the context it signals.

use crate::error::EvalError;

/// A compiled hardware design instance driven by the cycle loop.
pub trait Dut {
    /// Re-evaluates the design: settles combinational logic and captures any
    /// clocked state transitions implied by the current inputs and the
    /// context's time.
    ///
    /// The design may call
    /// [`SimContext::set_finish`](crate::context::SimContext::set_finish)
    /// during evaluation. The driver observes the flag only after the
    /// evaluation returns, so the call always runs to completion.
    fn eval(&mut self) -> Result<(), EvalError>;

    /// Name used in log lines and error messages.
    fn name(&self) -> &str {
        "dut"
    }
}

impl<D: Dut + ?Sized> Dut for Box<D> {
    fn eval(&mut self) -> Result<(), EvalError> {
        (**self).eval()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimContext;

    struct Toggle<'ctx> {
        ctx: &'ctx SimContext,
        state: bool,
    }

    impl Dut for Toggle<'_> {
        fn eval(&mut self) -> Result<(), EvalError> {
            self.state = !self.state;
            if !self.state {
                self.ctx.set_finish();
            }
            Ok(())
        }
    }

    #[test]
    fn default_name() {
        let ctx = SimContext::new();
        let dut = Toggle {
            ctx: &ctx,
            state: false,
        };
        assert_eq!(dut.name(), "dut");
    }

    #[test]
    fn boxed_dut_forwards() {
        let ctx = SimContext::new();
        let mut dut: Box<dyn Dut + '_> = Box::new(Toggle {
            ctx: &ctx,
            state: false,
        });
        dut.eval().unwrap();
        assert!(!ctx.got_finish());
        dut.eval().unwrap();
        assert!(ctx.got_finish());
    }
}
