//! Story id resolution from a path.

/// Finds the story id a path points at, if any.
pub trait SidResolver: Send + Sync {
    fn resolve(&self, pathname: &str) -> Option<String>;
}

impl<F> SidResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, pathname: &str) -> Option<String> {
        self(pathname)
    }
}

/// Story ids are 24-digit hex document ids; the last such path segment wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdSidResolver;

impl SidResolver for ObjectIdSidResolver {
    fn resolve(&self, pathname: &str) -> Option<String> {
        pathname
            .split('/')
            .rev()
            .find(|seg| seg.len() == 24 && seg.bytes().all(|b| b.is_ascii_hexdigit()))
            .map(str::to_owned)
    }
}
