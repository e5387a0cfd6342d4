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

//! Operations on the images attached to productos.

use crate::db::ReadTable;
use crate::driver::{Driver, entity_error};
use crate::model::{EntityId, ImageName, Producto};
use bytes::Bytes;
use ciberloja_core::driver::DriverResult;
use log::info;
use url::Url;

impl Driver {
    /// Computes the URLs from which the images of `producto_id` can be fetched.
    async fn image_urls(&self, producto_id: EntityId) -> DriverResult<Vec<Url>> {
        let producto_id_str = producto_id.to_string();
        let names = self.images.list(producto_id).await?;
        Ok(names
            .iter()
            .map(|name| {
                self.base_urls.make_backend_url(&[
                    "api",
                    "file",
                    "image",
                    &producto_id_str,
                    name.as_str(),
                ])
            })
            .collect())
    }

    /// Attaches the image `name` with `content` to `producto_id` and returns the URLs of all of
    /// its images.
    pub(crate) async fn upload_image(
        self,
        producto_id: EntityId,
        name: ImageName,
        content: Bytes,
    ) -> DriverResult<Vec<Url>> {
        {
            let mut ex = self.db.ex().await?;
            Producto::get(&mut ex, producto_id)
                .await
                .map_err(|e| entity_error::<Producto>(Some(producto_id), e))?;
        }

        let length = content.len();
        self.images.put(producto_id, &name, content).await?;
        info!("Stored image {} of producto {} ({} bytes)", name, producto_id, length);

        self.image_urls(producto_id).await
    }

    /// Gets the first image of `producto_id` in name order, if any.
    pub(crate) async fn first_image(
        self,
        producto_id: EntityId,
    ) -> DriverResult<Option<(ImageName, Bytes)>> {
        let names = self.images.list(producto_id).await?;
        match names.into_iter().next() {
            Some(name) => {
                let content = self.images.get(producto_id, &name).await?;
                Ok(Some((name, content)))
            }
            None => Ok(None),
        }
    }

    /// Gets the URLs of all the images of `producto_id`.
    pub(crate) async fn list_image_urls(self, producto_id: EntityId) -> DriverResult<Vec<Url>> {
        self.image_urls(producto_id).await
    }

    /// Gets the contents of the image `name` of `producto_id`.
    pub(crate) async fn get_image(self, producto_id: EntityId, name: ImageName) -> DriverResult<Bytes> {
        self.images.get(producto_id, &name).await
    }
}
