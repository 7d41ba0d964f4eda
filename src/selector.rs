// Interactive bucket selection and confirmation
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use crate::common::{
    Bucket,
    StorageService,
};
use crate::teardown::{
    AccessPointOutcome,
    Sequencer,
    TeardownOutcome,
    TeardownResult,
};
use std::io::{
    BufRead,
    Write,
};
use std::num::IntErrorKind;
use tracing::debug;

/// Text that confirms deleting a single bucket.
pub const CONFIRM_SINGLE: &str = "DELETE";

/// Text that confirms deleting every bucket.
pub const CONFIRM_ALL: &str = "DELETE ALL";

/// Which buckets were chosen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Selection {
    /// The bucket at this index of the listing.
    Single(usize),
    /// Every listed bucket.
    All,
}

/// Why the selector finished.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ending {
    /// There was nothing to select from.
    NoBuckets,
    /// The user quit, didn't confirm, or input ended.
    Cancelled,
    /// A number outside of the listing was entered.
    InvalidSelection,
    /// Something other than a number was entered.
    InvalidInput,
    /// The selected buckets were processed.
    Completed,
}

/// States of the selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Showing the buckets.
    Listing,
    /// Waiting for a bucket number, `0` or `q`.
    AwaitingChoice,
    /// Waiting for `DELETE` for the bucket at this index.
    AwaitingConfirmSingle(usize),
    /// Waiting for `DELETE ALL`.
    AwaitingConfirmAll,
    /// Tearing down the selection.
    Processing(Selection),
    /// Finished, nothing else will happen.
    Done(Ending),
}

// Strip the line ending but nothing else, confirmation must be exact.
fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

impl State {
    /// Returns the state following `self` given a line of `input`.
    ///
    /// `None` means input has ended. `bucket_count` is the number of listed
    /// buckets. `Processing` moves to `Done` once the caller has processed
    /// the selection.
    pub fn next(self, input: Option<&str>, bucket_count: usize) -> Self {
        match self {
            Self::Listing => {
                if bucket_count == 0 {
                    Self::Done(Ending::NoBuckets)
                }
                else {
                    Self::AwaitingChoice
                }
            },
            Self::AwaitingChoice => {
                let Some(line) = input else {
                    return Self::Done(Ending::Cancelled);
                };

                let choice = line.trim();

                if choice.eq_ignore_ascii_case("q") {
                    return Self::Done(Ending::Cancelled);
                }

                match choice.parse::<i64>() {
                    Ok(0) => Self::AwaitingConfirmAll,
                    Ok(n) => {
                        match usize::try_from(n) {
                            Ok(n) if n <= bucket_count => {
                                Self::AwaitingConfirmSingle(n - 1)
                            },
                            _ => Self::Done(Ending::InvalidSelection),
                        }
                    },
                    // Too many digits is still a number, just not one of ours.
                    Err(err) if matches!(
                        err.kind(),
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow,
                    ) => Self::Done(Ending::InvalidSelection),
                    Err(_) => Self::Done(Ending::InvalidInput),
                }
            },
            Self::AwaitingConfirmSingle(index) => {
                match input.map(strip_line_ending) {
                    Some(CONFIRM_SINGLE) => Self::Processing(Selection::Single(index)),
                    _                    => Self::Done(Ending::Cancelled),
                }
            },
            Self::AwaitingConfirmAll => {
                match input.map(strip_line_ending) {
                    Some(CONFIRM_ALL) => Self::Processing(Selection::All),
                    _                 => Self::Done(Ending::Cancelled),
                }
            },
            Self::Processing(_) => Self::Done(Ending::Completed),
            Self::Done(ending)  => Self::Done(ending),
        }
    }
}

/// What a selector run did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunSummary {
    /// Why the run ended.
    pub ending:  Ending,
    /// One result per processed bucket, in processing order.
    pub results: Vec<TeardownResult>,
}

impl RunSummary {
    /// Returns the buckets that weren't deleted.
    pub fn failed_buckets(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.succeeded())
            .map(|r| r.bucket.as_str())
            .collect()
    }

    /// Check if any bucket was left because its access points couldn't be
    /// removed through the service.
    pub fn access_points_unavailable(&self) -> bool {
        self.results.iter().any(|r| {
            matches!(
                &r.outcome,
                TeardownOutcome::ManualCleanupRequired { cleanup, .. }
                    if matches!(cleanup.access_points, AccessPointOutcome::Unavailable(_))
            )
        })
    }
}

/// Drives the interactive prompt over any input and output.
pub struct Selector<R, W> {
    input:  R,
    output: W,
}

impl<R: BufRead, W: Write> Selector<R, W> {
    /// Returns a `Selector` reading answers from `input` and writing prompts
    /// to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
        }
    }

    // Prompt and read one line, `None` at the end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)
            .context("Failed to read input")?;

        if read == 0 {
            writeln!(self.output)?;

            return Ok(None);
        }

        Ok(Some(line))
    }

    fn list(&mut self, buckets: &[Bucket]) -> Result<()> {
        writeln!(self.output, "\n⚠️  WARNING: This operation is IRREVERSIBLE!")?;
        writeln!(self.output, "⚠️  All bucket data will be permanently deleted!")?;
        writeln!(self.output, "\nFound {} buckets across all regions:", buckets.len())?;

        for (i, bucket) in buckets.iter().enumerate() {
            writeln!(
                self.output,
                "  {}. {} (region: {})",
                i + 1,
                bucket.name,
                bucket.region_name(),
            )?;
        }

        writeln!(self.output, "\n  0. Delete ALL buckets")?;

        Ok(())
    }

    fn report(&mut self, result: &TeardownResult) -> Result<()> {
        match &result.outcome {
            TeardownOutcome::Deleted { .. } => {
                writeln!(self.output, "  ✓ Deleted bucket {}", result.bucket)?;
            },
            TeardownOutcome::Failed { step, error } => {
                writeln!(
                    self.output,
                    "  ✗ Failed to delete bucket {} while {}: {}",
                    result.bucket,
                    step,
                    error,
                )?;
                writeln!(self.output, "    ⚠️  SKIPPED - Manual cleanup required in console")?;
            },
            TeardownOutcome::ManualCleanupRequired { error, .. } => {
                writeln!(
                    self.output,
                    "  ✗ Failed to delete bucket {} after clearing configuration: {}",
                    result.bucket,
                    error,
                )?;
                writeln!(self.output, "    ⚠️  SKIPPED - Manual cleanup required in console")?;
            },
        }

        Ok(())
    }

    /// Run the selector over `buckets`, tearing down whatever gets selected
    /// and confirmed with `sequencer`.
    pub async fn run<S: StorageService>(
        &mut self,
        buckets:   &[Bucket],
        sequencer: &Sequencer<'_, S>,
    ) -> Result<RunSummary> {
        let mut state   = State::Listing;
        let mut results = Vec::new();

        let ending = loop {
            debug!("selector state: {:?}", state);

            let input = match state {
                State::Listing => {
                    if buckets.is_empty() {
                        writeln!(self.output, "No buckets found.")?;
                    }
                    else {
                        self.list(buckets)?;
                    }

                    None
                },
                State::AwaitingChoice => {
                    self.prompt("\nEnter number to delete (or 'q' to quit): ")?
                },
                State::AwaitingConfirmSingle(index) => {
                    writeln!(
                        self.output,
                        "\n⚠️  You are about to DELETE bucket '{}' and all its contents!",
                        buckets[index].name,
                    )?;

                    self.prompt(&format!("Type '{}' to confirm: ", CONFIRM_SINGLE))?
                },
                State::AwaitingConfirmAll => {
                    writeln!(
                        self.output,
                        "\n⚠️  You are about to DELETE ALL {} buckets and their contents!",
                        buckets.len(),
                    )?;

                    self.prompt(&format!("Type '{}' to confirm: ", CONFIRM_ALL))?
                },
                State::Processing(Selection::Single(index)) => {
                    let result = sequencer.teardown(&buckets[index].name).await;

                    self.report(&result)?;
                    results.push(result);

                    None
                },
                State::Processing(Selection::All) => {
                    for (i, bucket) in buckets.iter().enumerate() {
                        writeln!(
                            self.output,
                            "\n--- Processing {}/{} ---",
                            i + 1,
                            buckets.len(),
                        )?;

                        let result = sequencer.teardown(&bucket.name).await;

                        self.report(&result)?;
                        results.push(result);
                    }

                    None
                },
                State::Done(ending) => break ending,
            };

            state = state.next(input.as_deref(), buckets.len());
        };

        let summary = RunSummary {
            ending,
            results,
        };

        self.finish(&summary)?;

        Ok(summary)
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        match summary.ending {
            Ending::Cancelled        => writeln!(self.output, "Operation cancelled.")?,
            Ending::InvalidSelection => writeln!(self.output, "Invalid selection.")?,
            Ending::InvalidInput     => {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
            },
            Ending::NoBuckets        => {},
            Ending::Completed        => {
                let failed = summary.failed_buckets();

                if failed.is_empty() {
                    return Ok(());
                }

                if summary.results.len() == 1 {
                    writeln!(
                        self.output,
                        "\n⚠️  Bucket '{}' requires manual cleanup in console",
                        failed[0],
                    )?;
                }
                else {
                    writeln!(
                        self.output,
                        "\n⚠️  {} bucket(s) require manual cleanup:",
                        failed.len(),
                    )?;

                    for bucket in failed {
                        writeln!(self.output, "   - {}", bucket)?;
                    }
                }

                if summary.access_points_unavailable() {
                    writeln!(
                        self.output,
                        "\nAccess points can't be removed through the S3-compatible API.",
                    )?;
                    writeln!(
                        self.output,
                        "Please remove access points manually in the Alibaba Cloud console",
                    )?;
                }
            },
        }

        Ok(())
    }
}
