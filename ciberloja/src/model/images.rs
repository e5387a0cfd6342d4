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

//! Names of the images attached to products.

use ciberloja_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of an image name in bytes.
const MAX_NAME_LENGTH: usize = 255;

/// The basename of an image file.  Cannot be used to escape the directory it lives in.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct ImageName(String);

impl ImageName {
    /// Creates a new image name after validating it.
    pub(crate) fn new<S: Into<String>>(name: S) -> ModelResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError("Image name cannot be empty".to_owned()));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(ModelError("Image name is too long".to_owned()));
        }
        if name.starts_with('.') {
            return Err(ModelError(format!("Image name '{}' cannot start with a dot", name)));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(ModelError(format!("Image name '{}' contains invalid characters", name)));
        }
        Ok(Self(name))
    }

    /// Returns the string representation of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Guesses the content type of the image based on its extension.
    pub(crate) fn content_type(&self) -> mime::Mime {
        let extension = match self.0.rsplit_once('.') {
            Some((_, extension)) => extension.to_ascii_lowercase(),
            None => return mime::APPLICATION_OCTET_STREAM,
        };
        match extension.as_str() {
            "png" => mime::IMAGE_PNG,
            "jpg" | "jpeg" => mime::IMAGE_JPEG,
            _ => mime::APPLICATION_OCTET_STREAM,
        }
    }
}

impl TryFrom<String> for ImageName {
    type Error = ModelError;

    fn try_from(name: String) -> ModelResult<Self> {
        ImageName::new(name)
    }
}

impl From<ImageName> for String {
    fn from(name: ImageName) -> Self {
        name.0
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imagename_ok() {
        assert_eq!("foto.png", ImageName::new("foto.png").unwrap().as_str());
        assert_eq!("sin extension", ImageName::new("sin extension").unwrap().as_str());
        ImageName::new("a".repeat(MAX_NAME_LENGTH)).unwrap();
    }

    #[test]
    fn test_imagename_errors() {
        for name in ["", ".hidden", "..", "a/b.png", "..\\x.png", "nul\0.png"] {
            ImageName::new(name).unwrap_err();
        }
        ImageName::new("a".repeat(MAX_NAME_LENGTH + 1)).unwrap_err();
    }

    #[test]
    fn test_imagename_content_type() {
        assert_eq!(mime::IMAGE_PNG, ImageName::new("a.png").unwrap().content_type());
        assert_eq!(mime::IMAGE_PNG, ImageName::new("a.PNG").unwrap().content_type());
        assert_eq!(mime::IMAGE_JPEG, ImageName::new("a.jpg").unwrap().content_type());
        assert_eq!(mime::IMAGE_JPEG, ImageName::new("a.Jpeg").unwrap().content_type());
        assert_eq!(
            mime::APPLICATION_OCTET_STREAM,
            ImageName::new("a.gif").unwrap().content_type()
        );
        assert_eq!(mime::APPLICATION_OCTET_STREAM, ImageName::new("png").unwrap().content_type());
    }
}
