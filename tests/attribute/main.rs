// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt;
use std::panic;

use pending_until_fixed::pending_until_fixed;

const PENDING_PASSED: &str = "Pending test passed, remove the `@PendingUntilFixed` annotation.";

fn round_half_up(x: f64) -> f64 {
    // still rounds half to even
    let r = x.round();
    if (x - x.trunc()).abs() == 0.5 && r % 2.0 != 0.0 {
        r - 1.0
    } else {
        r
    }
}

#[derive(Debug)]
struct ProbeError(&'static str);

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probe failed: {}", self.0)
    }
}

fn probe(ok: bool) -> Result<u32, ProbeError> {
    if ok {
        Ok(42)
    } else {
        Err(ProbeError("no response"))
    }
}

#[test]
#[pending_until_fixed("RCRM-3943")]
fn test_failing_assertion_is_skipped() {
    assert_eq!(round_half_up(2.5), 3.0);
}

#[test]
#[should_panic(expected = "Pending test passed, remove the `@PendingUntilFixed` annotation.")]
#[pending_until_fixed("RCRM-3943")]
fn test_passing_body_fails() {
    assert_eq!(round_half_up(1.2), 1.0);
}

#[test]
#[pending_until_fixed("RCRM-3944")]
fn test_error_return_is_skipped() -> Result<(), ProbeError> {
    let value = probe(false)?;
    assert_eq!(value, 42);
    Ok(())
}

#[pending_until_fixed("RCRM-3944")]
fn responsive_probe() -> Result<(), ProbeError> {
    let value = probe(true)?;
    assert_eq!(value, 42);
    Ok(())
}

#[test]
fn test_ok_return_fails() {
    let payload = panic::catch_unwind(responsive_probe).unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some(PENDING_PASSED)
    );
}

#[test]
#[pending_until_fixed("RCRM-3949")]
fn test_todo_body_is_skipped() {
    todo!()
}

#[test]
#[pending_until_fixed("RCRM-3949")]
fn test_panicking_body_is_skipped() {
    panic!("half rounded down")
}

#[test]
#[pending_until_fixed("RCRM-3950")]
#[allow(clippy::unused_unit)]
fn test_explicit_unit_return_is_skipped() -> () {
    assert_eq!(round_half_up(8.5), 9.0);
}

#[derive(Debug)]
struct Timeout;

#[test]
#[pending_until_fixed("RCRM-3951")]
fn test_debug_only_error_is_skipped() -> Result<(), Timeout> {
    Err(Timeout)
}

#[test]
#[pending_until_fixed("RCRM-3945")]
fn test_early_return_stays_inside_body() {
    if round_half_up(0.5) == 1.0 {
        return;
    }
    panic!("half rounded down");
}

#[tokio::test]
#[pending_until_fixed("RCRM-3946")]
async fn test_async_failure_is_skipped() {
    tokio::task::yield_now().await;
    assert_eq!(round_half_up(4.5), 5.0);
}

#[tokio::test]
#[should_panic(expected = "Pending test passed")]
#[pending_until_fixed("RCRM-3946")]
async fn test_async_pass_fails() {
    tokio::task::yield_now().await;
    assert_eq!(round_half_up(4.2), 4.0);
}

#[tokio::test]
#[pending_until_fixed("RCRM-3947")]
async fn test_async_error_return_is_skipped() -> Result<(), ProbeError> {
    tokio::task::yield_now().await;
    probe(false)?;
    Ok(())
}

#[tokio::test]
#[pending_until_fixed("RCRM-3949")]
async fn test_async_unimplemented_body_is_skipped() {
    unimplemented!()
}

#[pending_until_fixed("RCRM-3948")]
#[tokio::test]
async fn test_attribute_order_does_not_matter() {
    assert_eq!(round_half_up(6.5), 7.0);
}

mod standalone {
    use pending_until_fixed::{run_pending, run_pending_async};

    use super::*;

    #[test]
    fn test_run_pending_in_plain_test() {
        run_pending("RCRM-3943", || assert_eq!(round_half_up(2.5), 3.0));
    }

    #[test]
    #[should_panic(expected = "Pending test passed")]
    fn test_run_pending_pass_panics() {
        run_pending("RCRM-3943", || probe(true).map(|_| ()));
    }

    #[tokio::test]
    async fn test_run_pending_async_in_tokio_test() {
        run_pending_async("RCRM-3946", async { probe(false).map(|_| ()) }).await;
    }
}
