/// Execute an aggregate command deterministically (no IO, no async).
///
/// This function provides the canonical lifecycle for the session-state
/// machines, combining decision and state evolution in one step:
///
/// 1. **Decide**: Calls `aggregate.handle(command)` to get events (pure, no mutation)
/// 2. **Evolve**: Applies each event to the aggregate via `aggregate.apply(event)`
///
/// If the command is rejected, the aggregate is left untouched and the error is
/// returned as-is. A command that is accepted but changes nothing yields an
/// empty event vector, which is also not an error.
///
/// ## Version Tracking
///
/// The aggregate is responsible for maintaining its own version tracking
/// consistently during `apply()`. Typically, each call to `apply()` increments
/// the version by 1.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: shopfront_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
