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

//! Products on sale.

use crate::model::{EntityId, deserialize_finite_bound, validate_precio};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product on sale.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Producto {
    /// Name of the product.
    #[validate(length(min = 1))]
    pub(crate) nombre: String,

    /// Long description, if any.
    #[serde(default)]
    pub(crate) descripcion: Option<String>,

    /// Unit price.
    #[validate(custom(function = "validate_precio"))]
    pub(crate) precio: f64,

    /// Units available in stock.
    #[validate(range(min = 0))]
    pub(crate) stock_disponible: i64,

    /// Category of the product.
    pub(crate) id_categoria: i64,

    /// Brand of the product.
    pub(crate) id_marca: i64,

    /// Unit in which the product is measured.
    pub(crate) id_unidad_medida: i64,
}

/// Criteria to search for products.  Names match by substring and ranges are inclusive.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductoCriteria {
    /// Exact identifier.
    pub(crate) id: Option<EntityId>,

    /// Substring of the name.
    pub(crate) nombre: Option<String>,

    /// Substring of the description.
    pub(crate) descripcion: Option<String>,

    /// Lowest price.
    #[serde(default, deserialize_with = "deserialize_finite_bound")]
    pub(crate) precio_min: Option<f64>,

    /// Highest price.
    #[serde(default, deserialize_with = "deserialize_finite_bound")]
    pub(crate) precio_max: Option<f64>,

    /// Lowest stock.
    pub(crate) stock_min: Option<i64>,

    /// Highest stock.
    pub(crate) stock_max: Option<i64>,

    /// Exact category.
    pub(crate) id_categoria: Option<i64>,

    /// Exact brand.
    pub(crate) id_marca: Option<i64>,

    /// Exact measurement unit.
    pub(crate) id_unidad_medida: Option<i64>,
}

/// Body of a product update.  The identifier is optional because it also comes in the path.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct ProductoUpdate {
    /// Identifier of the product, which must match the one in the path if present.
    #[serde(default)]
    pub(crate) id: Option<EntityId>,

    /// New contents of the product.
    #[serde(flatten)]
    pub(crate) producto: Producto,
}

impl Validate for ProductoUpdate {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.producto.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producto_validate() {
        let mut producto = Producto {
            nombre: "Cafe".to_owned(),
            descripcion: None,
            precio: 0.0,
            stock_disponible: 0,
            id_categoria: 1,
            id_marca: 1,
            id_unidad_medida: 1,
        };
        producto.validate().unwrap();

        producto.precio = -0.5;
        producto.stock_disponible = -1;
        let errors = producto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("precio"));
        assert!(errors.field_errors().contains_key("stock_disponible"));

        producto.stock_disponible = 0;
        for precio in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            producto.precio = precio;
            let errors = producto.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("precio"));
        }
    }

    #[test]
    fn test_productoupdate_optional_id() {
        let body = serde_json::json!({
            "nombre": "Cafe",
            "precio": 2.5,
            "stockDisponible": 3,
            "idCategoria": 1,
            "idMarca": 2,
            "idUnidadMedida": 3,
        });
        let update: ProductoUpdate = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(None, update.id);
        assert_eq!(2.5, update.producto.precio);

        let mut with_id = body;
        with_id["id"] = serde_json::json!(9);
        let update: ProductoUpdate = serde_json::from_value(with_id).unwrap();
        assert_eq!(Some(EntityId::from(9)), update.id);
    }
}
