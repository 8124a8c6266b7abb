//! Facade configuration.

use tower_http::cors::CorsLayer;

use crate::app::toolkit::Toolkit;
use crate::registry::ModuleSet;

/// Default external mount path.
pub const DEFAULT_PREFIX: &str = "/api";
/// Default global module base.
pub const DEFAULT_BASE: &str = "/";
/// Default request body limit (2 MiB, axum's own default).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;
/// Version reported by the liveness endpoint unless overridden.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Caller setup: receives the capability bundle, returns the modules to mount.
pub type SetupFn = Box<dyn FnOnce(&Toolkit) -> anyhow::Result<ModuleSet>>;

/// Options accepted by [`crate::app::build_api`].
pub struct ApiOptions {
    pub(crate) prefix: String,
    pub(crate) base: String,
    pub(crate) cors: Option<CorsLayer>,
    pub(crate) strict_methods: bool,
    pub(crate) body_limit: usize,
    pub(crate) version: String,
    pub(crate) http_client: Option<reqwest::Client>,
    pub(crate) setup: Option<SetupFn>,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            base: DEFAULT_BASE.to_string(),
            cors: None,
            strict_methods: false,
            body_limit: DEFAULT_BODY_LIMIT,
            version: DEFAULT_VERSION.to_string(),
            http_client: None,
            setup: None,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ApiOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `ADVANCE_API_PREFIX`, `ADVANCE_API_BASE`,
    /// `ADVANCE_API_STRICT_METHODS` and `ADVANCE_API_BODY_LIMIT`.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Some(prefix) = env_var("ADVANCE_API_PREFIX") {
            options.prefix = prefix;
        }
        if let Some(base) = env_var("ADVANCE_API_BASE") {
            options.base = base;
        }
        if let Some(raw) = env_var("ADVANCE_API_STRICT_METHODS") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => options.strict_methods = true,
                "0" | "false" | "no" | "off" => options.strict_methods = false,
                _ => tracing::warn!(value = %raw, "ADVANCE_API_STRICT_METHODS is not a boolean; ignoring"),
            }
        }
        if let Some(raw) = env_var("ADVANCE_API_BODY_LIMIT") {
            match raw.trim().parse::<usize>() {
                Ok(limit) => options.body_limit = limit,
                Err(_) => tracing::warn!(value = %raw, "ADVANCE_API_BODY_LIMIT is not a byte count; ignoring"),
            }
        }

        options
    }

    /// External mount path (default `/api`).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Global base joined in front of every caller module (default `/`).
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// CORS policy; allow-all when not set.
    pub fn cors(mut self, cors: CorsLayer) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Fail bootstrap on verbs other than GET/POST/PUT/DELETE instead of
    /// recording them catalog-only.
    pub fn strict_methods(mut self, strict: bool) -> Self {
        self.strict_methods = strict;
        self
    }

    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Version reported by the liveness endpoint.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// HTTP client exposed through the toolkit; a default client otherwise.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Setup function run once with the toolkit; its modules are mounted
    /// after the built-ins.
    pub fn setup<F, M>(mut self, setup: F) -> Self
    where
        F: FnOnce(&Toolkit) -> anyhow::Result<M> + 'static,
        M: Into<ModuleSet> + 'static,
    {
        self.setup = Some(Box::new(move |toolkit: &Toolkit| setup(toolkit).map(Into::<ModuleSet>::into)));
        self
    }

    pub fn get_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn get_base(&self) -> &str {
        &self.base
    }

    pub fn has_setup(&self) -> bool {
        self.setup.is_some()
    }
}

impl core::fmt::Debug for ApiOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiOptions")
            .field("prefix", &self.prefix)
            .field("base", &self.base)
            .field("custom_cors", &self.cors.is_some())
            .field("strict_methods", &self.strict_methods)
            .field("body_limit", &self.body_limit)
            .field("version", &self.version)
            .field("setup", &self.setup.is_some())
            .finish()
    }
}
