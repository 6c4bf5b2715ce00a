/// A hook that runs to completion before schema resolution begins.
///
/// Hooks are the `require` entries of the configuration, resolved to
/// implementations at the binary boundary and injected here. Their only
/// contract with the pipeline is ordering: every hook finishes (or fails the
/// run) before the first schema source is touched. Side effects, such as
/// registering state consumed later by templates, are the hook's business.
pub trait PreloadHook {
    fn name(&self) -> &str;

    fn run(&self) -> anyhow::Result<()>;
}
