//! Functional programming utilities

/// Run the closure and return its result only when `predicate` holds
pub fn when<W, F>(predicate: bool, f: F) -> Result<(), W>
where
    F: FnOnce() -> Result<(), W>,
{
    if predicate {
        f()
    } else {
        Ok(())
    }
}
