/// Endpoint paths under the service base url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urls {
    base_url: String,
}

impl Urls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    pub fn contexts(&self) -> String {
        self.join("context")
    }

    pub fn context_named(&self, name: &str) -> String {
        self.join(&format!("context/{name}"))
    }

    pub fn context_files(&self) -> String {
        self.join("context/file")
    }

    pub fn context_upload(&self) -> String {
        self.join("context/file/upload")
    }

    pub fn context_search(&self) -> String {
        self.join("context/chunk/search")
    }

    pub fn pipelines(&self) -> String {
        self.join("pipeline")
    }

    pub fn pipeline_named(&self, name: &str) -> String {
        self.join(&format!("pipeline/{name}"))
    }

    pub fn pipeline_runs(&self) -> String {
        self.join("pipeline/run")
    }

    pub fn run_results(&self) -> String {
        self.join("run/results")
    }
}

#[cfg(test)]
#[path = "urls_test.rs"]
mod tests;
