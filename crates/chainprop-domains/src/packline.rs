//! Production-line job sequencing.
//!
//! Each line (anchor) carries a baseline start instant. A job starts
//! cleaning when its predecessor ends (or at the line baseline when it is
//! the head), starts production after the changeover from the previous
//! product, clipped forward to its ready instant, and ends after its
//! production duration.

use std::collections::HashMap;

use chainprop_core::{
    AnchorId, AttributeComputer, ComputeError, DerivedState, ElementId, PredecessorView,
};

/// Time in minutes from the schedule baseline.
pub type Minutes = i64;

/// Identity of a product; changeover durations are keyed per product pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductId(pub usize);

/// Static data of one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    /// The product this job packages.
    pub product: ProductId,
    /// Production duration in minutes.
    pub duration: Minutes,
    /// Earliest instant production may start.
    pub ready: Minutes,
}

/// Derived schedule of one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobSchedule {
    /// When line cleaning for this job starts.
    pub start_cleaning: Minutes,
    /// When production starts, after changeover and the ready clip.
    pub start_production: Minutes,
    /// When production ends.
    pub end: Minutes,
}

impl DerivedState for JobSchedule {
    fn attribute_names() -> &'static [&'static str] {
        &["start_cleaning", "start_production", "end"]
    }

    fn attribute_eq(&self, other: &Self, index: usize) -> bool {
        match index {
            0 => self.start_cleaning == other.start_cleaning,
            1 => self.start_production == other.start_production,
            2 => self.end == other.end,
            _ => true,
        }
    }
}

/// Attribute computer for production-line chains.
///
/// Changeover durations are keyed by `(previous product, product)`; the
/// previous product is `None` for the head of a line, covering the
/// baseline-to-first-job cleanup. A missing entry is a fatal configuration
/// error, never a silent zero.
#[derive(Debug, Clone, Default)]
pub struct PacklineComputer {
    line_starts: HashMap<AnchorId, Minutes>,
    jobs: HashMap<ElementId, Job>,
    changeovers: HashMap<(Option<ProductId>, ProductId), Minutes>,
}

impl PacklineComputer {
    /// Creates an empty computer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a line's baseline start instant.
    pub fn set_line_start(&mut self, line: AnchorId, start: Minutes) {
        self.line_starts.insert(line, start);
    }

    /// Registers a job's static data.
    pub fn set_job(&mut self, element: ElementId, job: Job) {
        self.jobs.insert(element, job);
    }

    /// Registers the changeover duration from `previous` (`None` = line
    /// baseline) to `product`.
    pub fn set_changeover(
        &mut self,
        previous: Option<ProductId>,
        product: ProductId,
        duration: Minutes,
    ) {
        self.changeovers.insert((previous, product), duration);
    }

    fn job(&self, element: ElementId) -> Result<Job, ComputeError> {
        self.jobs
            .get(&element)
            .copied()
            .ok_or_else(|| ComputeError::MissingStaticData(format!("no job data for {element}")))
    }

    fn line_start(&self, line: AnchorId) -> Result<Minutes, ComputeError> {
        self.line_starts
            .get(&line)
            .copied()
            .ok_or_else(|| ComputeError::MissingStaticData(format!("no start time for {line}")))
    }

    fn changeover(
        &self,
        previous: Option<ProductId>,
        product: ProductId,
    ) -> Result<Minutes, ComputeError> {
        self.changeovers.get(&(previous, product)).copied().ok_or_else(|| {
            ComputeError::MissingStaticData(format!(
                "no changeover duration from {previous:?} to {product:?}"
            ))
        })
    }
}

impl AttributeComputer for PacklineComputer {
    type State = JobSchedule;

    fn compute(
        &self,
        element: ElementId,
        predecessor: PredecessorView<'_, JobSchedule>,
    ) -> Result<JobSchedule, ComputeError> {
        let job = self.job(element)?;
        let (start_cleaning, previous_product) = match predecessor {
            PredecessorView::Anchor(line) => (self.line_start(line)?, None),
            PredecessorView::Element(prev, state) => (state.end, Some(self.job(prev)?.product)),
        };
        let changeover = self.changeover(previous_product, job.product)?;
        let start_production = (start_cleaning + changeover).max(job.ready);
        Ok(JobSchedule {
            start_cleaning,
            start_production,
            end: start_production + job.duration,
        })
    }
}
