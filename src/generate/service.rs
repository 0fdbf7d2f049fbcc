// Generation orchestration - rate limit, validate, retry once with
// feedback, honor cancellation, then adopt the notes into the score

use crate::generate::model::{MelodyRequest, MelodyResponse};
use crate::generate::rate_limit::RateLimiter;
use crate::generate::GenerateError;
use crate::sequencer::score::Score;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Backend seam for melody generation
///
/// Implementations talk to a concrete provider; the orchestration here
/// never sees transport details.
pub trait MelodyGenerator {
    /// First attempt for a request
    fn generate(&self, request: &MelodyRequest) -> Result<MelodyResponse, GenerateError>;

    /// Second attempt, carrying the previous validation failure as feedback
    fn generate_retry(
        &self,
        request: &MelodyRequest,
        error: &str,
    ) -> Result<MelodyResponse, GenerateError>;
}

/// Generate a melody and validate it, retrying once on validation failure
///
/// The first invalid response is fed back to the backend verbatim; if the
/// second response is also invalid, its error is final. One retry only -
/// more buys little and multiplies provider cost.
pub fn generate_validated(
    backend: &dyn MelodyGenerator,
    request: &MelodyRequest,
) -> Result<MelodyResponse, GenerateError> {
    request.validate()?;

    let response = backend.generate(request)?;
    match response.validate(request.measures, request.scale.as_ref()) {
        Ok(()) => Ok(response),
        Err(validation_error) => {
            log::warn!("generated melody failed validation, retrying once: {validation_error}");
            let retry = backend.generate_retry(request, &validation_error.to_string())?;
            retry.validate(request.measures, request.scale.as_ref())?;
            Ok(retry)
        }
    }
}

/// Owns the rate limiter and drives one generation end to end
pub struct GenerationService {
    limiter: RateLimiter,
}

impl GenerationService {
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }

    /// Run a generation and adopt the result into the score
    ///
    /// Order: rate-limit check before dispatch, generate with one
    /// validation retry, then a cancellation check after the backend call
    /// resolves - a cancelled request discards its result. Returns the
    /// number of notes adopted.
    pub fn generate_into_score(
        &mut self,
        backend: &dyn MelodyGenerator,
        request: &MelodyRequest,
        cancelled: &Arc<AtomicBool>,
        score: &mut Score,
        track_id: &str,
        overlay: bool,
    ) -> Result<usize, GenerateError> {
        self.limiter.check()?;

        let response = generate_validated(backend, request)?;

        if cancelled.load(Ordering::SeqCst) {
            return Err(GenerateError::Cancelled);
        }

        Ok(score.import_generated(&response.notes, track_id, overlay))
    }
}
