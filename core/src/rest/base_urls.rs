// CiberLoja
// Copyright 2025 The CiberLoja Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! The `BaseUrls` type.

use crate::env::{get_optional_var, get_required_var};
use url::Url;

/// Checks if `base` has the right format to be a base URL and returns an error if it is not.
fn ensure_valid_base(base: &Url) -> Result<(), String> {
    if base.cannot_be_a_base() || !base.path().ends_with('/') {
        return Err(format!("URL '{}' cannot be a base: missing trailing slash", base));
    }
    if base.query().is_some() || base.fragment().is_some() {
        return Err(format!("URL '{}' cannot be a base: has a query or fragment", base));
    }
    Ok(())
}

/// Appends `segments` to the path of `base`, percent-encoding each of them.
fn extend(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Contains the backend and frontend base URLs of a service and allows building absolute URLs
/// within either.
///
/// The backend URL points at the service itself and is used to generate links to resources it
/// serves, like product images.  The frontend URL points at the web store and is used to generate
/// links that users follow from their email, like password resets.  When the frontend is not
/// configured, the backend is assumed to serve it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseUrls {
    /// The base URL to the backend service (ourselves).
    backend: Url,

    /// The base URL to the frontend service.  Should be `None` if the frontend is served by us.
    frontend: Option<Url>,
}

impl BaseUrls {
    /// Creates a set of base URLs from already-parsed URLs.
    pub fn new(backend: Url, frontend: Option<Url>) -> Result<Self, String> {
        ensure_valid_base(&backend)?;
        if let Some(frontend) = frontend.as_ref() {
            ensure_valid_base(frontend)?;
        }
        Ok(Self { backend, frontend })
    }

    /// Creates a set of base URLs from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_BACKEND_BASE_URL`, `<prefix>_FRONTEND_BASE_URL`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let backend = get_required_var::<Url>(prefix, "BACKEND_BASE_URL")?;
        let frontend = get_optional_var::<Url>(prefix, "FRONTEND_BASE_URL")?;
        Self::new(backend, frontend)
    }

    /// Creates a set of base URLs from fixed strings, which must represent valid URLs.
    #[cfg(any(test, feature = "testutils"))]
    pub fn from_strs(backend: &'static str, frontend: Option<&'static str>) -> Self {
        let backend = Url::parse(backend).unwrap();
        let frontend = frontend.map(|s| Url::parse(s).unwrap());
        Self::new(backend, frontend).unwrap()
    }

    /// Generates a URL to the backend by appending the path `segments` to the base.
    pub fn make_backend_url(&self, segments: &[&str]) -> Url {
        extend(&self.backend, segments)
    }

    /// Generates a URL to the frontend by appending the path `segments` and the `query` pairs to
    /// the base.
    pub fn make_frontend_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = extend(self.frontend.as_ref().unwrap_or(&self.backend), segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Constructs a URL from a valid raw string for testing purposes.
    fn url(s: &'static str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_ensure_valid_base() {
        ensure_valid_base(&url("http://example.com")).unwrap();
        ensure_valid_base(&url("http://example.com/")).unwrap();
        ensure_valid_base(&url("http://example.com:1234/foo/")).unwrap();

        assert!(
            ensure_valid_base(&url("http://example.com:1234/foo"))
                .unwrap_err()
                .contains("missing trailing slash")
        );
        assert!(
            ensure_valid_base(&url("http://example.com/foo/?a=b"))
                .unwrap_err()
                .contains("has a query or fragment")
        );
        ensure_valid_base(&url("mailto:someone@example.com")).unwrap_err();
    }

    #[test]
    fn test_new_validates_frontend() {
        assert!(
            BaseUrls::new(url("http://example.com/ok/"), Some(url("http://example.com/bad")))
                .unwrap_err()
                .contains("/bad' cannot be a base")
        );
    }

    #[test]
    fn test_from_env_all_present() {
        let overrides = [
            ("TEST_BACKEND_BASE_URL", Some("https://api.example.com/")),
            ("TEST_FRONTEND_BASE_URL", Some("https://shop.example.com/app/")),
        ];
        temp_env::with_vars(overrides, || {
            assert_eq!(
                BaseUrls {
                    backend: url("https://api.example.com/"),
                    frontend: Some(url("https://shop.example.com/app/")),
                },
                BaseUrls::from_env("TEST").unwrap()
            );
        });
    }

    #[test]
    fn test_from_env_missing_backend() {
        temp_env::with_var_unset("TEST_BACKEND_BASE_URL", || {
            let err = BaseUrls::from_env("TEST").unwrap_err();
            assert!(err.contains("TEST_BACKEND_BASE_URL not present"));
        });
    }

    #[test]
    fn test_make_backend_url_encodes_segments() {
        let base_urls = BaseUrls::from_strs("http://backend.example.com/api/", None);

        assert_eq!(
            url("http://backend.example.com/api/file/image/3/a.png"),
            base_urls.make_backend_url(&["file", "image", "3", "a.png"])
        );
        assert_eq!(
            "http://backend.example.com/api/file/image/3/my%20photo%3F.png",
            base_urls.make_backend_url(&["file", "image", "3", "my photo?.png"]).as_str()
        );
    }

    #[test]
    fn test_make_frontend_url_same_as_backend() {
        let base_urls = BaseUrls::from_strs("http://backend.example.com/", None);

        assert_eq!(
            url("http://backend.example.com/reset-password?token=abc"),
            base_urls.make_frontend_url(&["reset-password"], &[("token", "abc")])
        );
    }

    #[test]
    fn test_make_frontend_url_different_from_backend() {
        let base_urls = BaseUrls::from_strs(
            "http://backend.example.com/api/",
            Some("http://frontend.example.com/shop/"),
        );

        assert_eq!(
            url("http://frontend.example.com/shop/reset-password"),
            base_urls.make_frontend_url(&["reset-password"], &[])
        );
    }
}
