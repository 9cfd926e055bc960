/// Desktop builds run port calls inline on the UI thread while the busy flag
/// gates re-entry; other targets can swap in a spawning shim here.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    f()
}
