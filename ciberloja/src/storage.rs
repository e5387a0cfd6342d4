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

//! Storage of the images attached to products.

use crate::model::{EntityId, ImageName};
use async_trait::async_trait;
use bytes::Bytes;
use ciberloja_core::driver::{DriverError, DriverResult};
use log::warn;
use std::io;
use std::path::PathBuf;

/// Abstraction over the location where product images live.
#[async_trait]
pub(crate) trait ImageStore {
    /// Stores `content` as the image `name` of `producto_id`, replacing any previous one.
    async fn put(&self, producto_id: EntityId, name: &ImageName, content: Bytes)
    -> DriverResult<()>;

    /// Lists the names of the images of `producto_id`, sorted by name.
    async fn list(&self, producto_id: EntityId) -> DriverResult<Vec<ImageName>>;

    /// Gets the contents of the image `name` of `producto_id`.
    async fn get(&self, producto_id: EntityId, name: &ImageName) -> DriverResult<Bytes>;
}

/// Converts an I/O error on `what` into a driver error.
fn map_io_error(e: io::Error, what: &str) -> DriverError {
    match e.kind() {
        io::ErrorKind::NotFound => DriverError::NotFound(format!("{} not found", what)),
        _ => DriverError::BackendError(format!("Image storage failed for {}: {}", what, e)),
    }
}

/// Image store backed by a local directory.
///
/// Images live in `<root>/producto/<id>/<name>`.
pub(crate) struct FsImageStore {
    /// Directory under which all images are stored.
    root: PathBuf,
}

impl FsImageStore {
    /// Creates a new store rooted at `root`.  The directory is created on first write.
    pub(crate) fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Computes the directory that holds the images of `producto_id`.
    fn producto_dir(&self, producto_id: EntityId) -> PathBuf {
        self.root.join("producto").join(producto_id.to_string())
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn put(
        &self,
        producto_id: EntityId,
        name: &ImageName,
        content: Bytes,
    ) -> DriverResult<()> {
        let dir = self.producto_dir(producto_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| map_io_error(e, &format!("Images of producto {}", producto_id)))?;
        tokio::fs::write(dir.join(name.as_str()), &content)
            .await
            .map_err(|e| map_io_error(e, &format!("Image {}", name)))
    }

    async fn list(&self, producto_id: EntityId) -> DriverResult<Vec<ImageName>> {
        let dir = self.producto_dir(producto_id);
        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(map_io_error(e, &format!("Images of producto {}", producto_id))),
        };

        let mut names = vec![];
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| map_io_error(e, &format!("Images of producto {}", producto_id)))?
        {
            let file_name = entry.file_name().to_string_lossy().to_string();
            match ImageName::new(file_name) {
                Ok(name) => names.push(name),
                Err(e) => warn!("Ignoring unexpected file in {}: {}", dir.display(), e),
            }
        }
        names.sort();
        Ok(names)
    }

    async fn get(&self, producto_id: EntityId, name: &ImageName) -> DriverResult<Bytes> {
        let path = self.producto_dir(producto_id).join(name.as_str());
        let content = tokio::fs::read(&path)
            .await
            .map_err(|e| map_io_error(e, &format!("Image {}", name)))?;
        Ok(Bytes::from(content))
    }
}
