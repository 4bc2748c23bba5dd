//! Cooperative progress hook.
//!
//! The pipeline never owns a thread. Instead it hands each per-pixel step
//! to a host-supplied [`Progress`] implementation, which decides when to run
//! it. A host may report progress, batch steps, or stop the pipeline by
//! returning an error instead of running the step.

use crate::error::Result;

/// Host hook invoked once per pixel.
pub trait Progress {
    /// Run (or refuse) one unit of work.
    ///
    /// `percent` rises monotonically through `0..100`. `stride` hints how
    /// many consecutive steps the host may batch before yielding. The work
    /// must have completed by the time this returns `Ok`.
    fn step(&mut self, percent: u8, stride: Option<usize>, work: &mut dyn FnMut()) -> Result<()>;
}

/// Runs every step immediately. Used by tests and batch callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Progress for Immediate {
    fn step(&mut self, _percent: u8, _stride: Option<usize>, work: &mut dyn FnMut()) -> Result<()> {
        work();
        Ok(())
    }
}

impl<F> Progress for F
where
    F: FnMut(u8, Option<usize>, &mut dyn FnMut()) -> Result<()>,
{
    fn step(&mut self, percent: u8, stride: Option<usize>, work: &mut dyn FnMut()) -> Result<()> {
        self(percent, stride, work)
    }
}

/// Integer percentage of `done` out of `total`, rounded down.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as u128 * 100) / total as u128).min(100) as u8
}

/// Drive `work` once per pixel index through `progress`.
pub(crate) fn for_each_pixel(
    total: usize,
    stride: Option<usize>,
    progress: &mut dyn Progress,
    mut work: impl FnMut(usize),
) -> Result<()> {
    for i in 0..total {
        progress.step(percent(i, total), stride, &mut || work(i))?;
    }
    Ok(())
}
