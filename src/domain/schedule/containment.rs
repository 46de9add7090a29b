use crate::domain::schedule::{DateWindow, Level, ReasonCode, Rejection};

/// Decides whether `candidate` may be stored at `level` given the parent
/// level's window for the same company.
///
/// Flexible windows skip containment (and the parent requirement) but never
/// the range check. An end-only task is contained when its end falls inside
/// the parent. On a containment violation the rejection carries the
/// candidate clamped to the parent's bounds.
pub fn validate(
    level: Level,
    candidate: &DateWindow,
    is_flexible: bool,
    parent: Option<&DateWindow>,
) -> Result<(), Rejection> {
    check_range(level, candidate)?;

    if level == Level::Project || is_flexible {
        return Ok(());
    }

    let parent = parent.ok_or(Rejection::new(ReasonCode::NoParentAssignment))?;

    let starts_early = match (candidate.start, parent.start) {
        (Some(start), Some(parent_start)) => start < parent_start,
        _ => false,
    };
    let ends_early = parent.start.is_some_and(|parent_start| candidate.end < parent_start);
    let ends_late = candidate.end > parent.end;

    if starts_early || ends_early || ends_late {
        return Err(Rejection::with_suggestion(
            ReasonCode::OutsideParentWindow,
            suggest(candidate, parent),
        ));
    }

    Ok(())
}

/// Checks that hold for every write regardless of the parent.
pub fn check_range(level: Level, candidate: &DateWindow) -> Result<(), Rejection> {
    if candidate.is_inverted() {
        return Err(Rejection::new(ReasonCode::InvertedRange));
    }

    if level.requires_start_date() && candidate.start.is_none() {
        return Err(Rejection::new(ReasonCode::MissingStartDate));
    }

    Ok(())
}

fn suggest(candidate: &DateWindow, parent: &DateWindow) -> DateWindow {
    let start = match (candidate.start, parent.start) {
        (Some(start), Some(parent_start)) => Some(start.max(parent_start)),
        (start, _) => start,
    };
    let mut end = candidate.end.min(parent.end);
    // an end-only window is pulled forward onto the parent's start
    if candidate.start.is_none()
        && let Some(parent_start) = parent.start
    {
        end = end.max(parent_start);
    }
    let clamped = DateWindow { start, end };

    // a candidate entirely outside the parent cannot be clamped into a valid range
    if clamped.is_inverted() {
        return *parent;
    }

    clamped
}
