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

//! Orders placed by customers.

use crate::model::{EntityId, date_format, deserialize_finite_bound};
use ciberloja_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

/// One line of an order.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineaPedido {
    /// Product being ordered.
    pub(crate) producto_id: EntityId,

    /// Number of units ordered.  Always positive.
    pub(crate) unidades: i64,

    /// Total price of the line.
    pub(crate) precio: f64,
}

/// An order placed by a customer.
///
/// The price of the order is derived from its lines and cannot be set independently.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Pedido {
    /// Date on which the order was placed.
    #[serde(with = "date_format")]
    fecha_realizacion: Date,

    /// Total price of the order, which is the sum of the prices of all lines.
    precio: f64,

    /// Customer that placed the order.
    cliente_id: EntityId,

    /// State of the order.
    tipo_estado_pedido_id: i64,

    /// Lines of the order.
    lineas: Vec<LineaPedido>,
}

impl Pedido {
    /// Creates a new order after validating its lines and computes its price.
    pub(crate) fn new(
        fecha_realizacion: Date,
        cliente_id: EntityId,
        tipo_estado_pedido_id: i64,
        lineas: Vec<LineaPedido>,
    ) -> ModelResult<Self> {
        if lineas.is_empty() {
            return Err(ModelError("Pedido must have at least one line".to_owned()));
        }
        for linea in &lineas {
            if linea.unidades <= 0 {
                return Err(ModelError(format!(
                    "Invalid number of units {} for producto {}",
                    linea.unidades, linea.producto_id
                )));
            }
            if !linea.precio.is_finite() || linea.precio < 0.0 {
                return Err(ModelError(format!(
                    "Invalid price {} for producto {}",
                    linea.precio, linea.producto_id
                )));
            }
        }
        let precio: f64 = lineas.iter().map(|linea| linea.precio).sum();
        if !precio.is_finite() {
            return Err(ModelError(format!("Invalid total price {}", precio)));
        }
        Ok(Self { fecha_realizacion, precio, cliente_id, tipo_estado_pedido_id, lineas })
    }

    /// Recreates an order from the values stored in the database, which are trusted.
    ///
    /// The lines are not part of the order row and must be attached with `with_lineas`.
    pub(crate) fn from_db(
        fecha_realizacion: Date,
        precio: f64,
        cliente_id: EntityId,
        tipo_estado_pedido_id: i64,
    ) -> Self {
        Self { fecha_realizacion, precio, cliente_id, tipo_estado_pedido_id, lineas: vec![] }
    }

    /// Replaces the lines of an order loaded from the database.
    pub(crate) fn with_lineas(self, lineas: Vec<LineaPedido>) -> Self {
        Self { lineas, ..self }
    }

    /// Returns the date on which the order was placed.
    pub(crate) fn fecha_realizacion(&self) -> Date {
        self.fecha_realizacion
    }

    /// Returns the total price of the order.
    pub(crate) fn precio(&self) -> f64 {
        self.precio
    }

    /// Returns the customer that placed the order.
    pub(crate) fn cliente_id(&self) -> EntityId {
        self.cliente_id
    }

    /// Returns the state of the order.
    pub(crate) fn tipo_estado_pedido_id(&self) -> i64 {
        self.tipo_estado_pedido_id
    }

    /// Returns the lines of the order.
    pub(crate) fn lineas(&self) -> &[LineaPedido] {
        &self.lineas
    }
}

/// Request to create or replace an order.
#[derive(Clone, Debug, Deserialize, Validate)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct PedidoRequest {
    /// Date of the order.  Defaults to today on creation and to the stored date on update.
    #[serde(default, with = "date_format::option")]
    pub(crate) fecha_realizacion: Option<Date>,

    /// Customer that places the order.
    pub(crate) cliente_id: EntityId,

    /// State of the order.
    pub(crate) tipo_estado_pedido_id: i64,

    /// Lines of the order.
    #[validate(length(min = 1))]
    pub(crate) lineas: Vec<LineaPedido>,
}

impl PedidoRequest {
    /// Builds the order described by this request, using `default_fecha` if no date was given.
    pub(crate) fn into_pedido(self, default_fecha: Date) -> ModelResult<Pedido> {
        Pedido::new(
            self.fecha_realizacion.unwrap_or(default_fecha),
            self.cliente_id,
            self.tipo_estado_pedido_id,
            self.lineas,
        )
    }
}

/// Criteria to search for orders.  Ranges are inclusive.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PedidoCriteria {
    /// Exact identifier.
    pub(crate) id: Option<EntityId>,

    /// Earliest date.
    #[serde(default, with = "date_format::option")]
    pub(crate) fecha_desde: Option<Date>,

    /// Latest date.
    #[serde(default, with = "date_format::option")]
    pub(crate) fecha_hasta: Option<Date>,

    /// Lowest price.
    #[serde(default, deserialize_with = "deserialize_finite_bound")]
    pub(crate) precio_desde: Option<f64>,

    /// Highest price.
    #[serde(default, deserialize_with = "deserialize_finite_bound")]
    pub(crate) precio_hasta: Option<f64>,

    /// Exact customer.
    pub(crate) cliente_id: Option<EntityId>,

    /// Exact state.
    pub(crate) tipo_estado_pedido_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    /// Shorthand to create an order line.
    fn linea(producto_id: i64, unidades: i64, precio: f64) -> LineaPedido {
        LineaPedido { producto_id: EntityId::from(producto_id), unidades, precio }
    }

    #[test]
    fn test_pedido_precio_is_sum_of_lines() {
        let pedido = Pedido::new(
            date!(2024 - 05 - 01),
            EntityId::from(1),
            1,
            vec![linea(1, 2, 10.5), linea(2, 1, 4.25)],
        )
        .unwrap();
        assert_eq!(14.75, pedido.precio());
        assert_eq!(2, pedido.lineas().len());
    }

    #[test]
    fn test_pedido_errors() {
        let fecha = date!(2024 - 05 - 01);
        let cliente = EntityId::from(1);
        assert_eq!(
            ModelError("Pedido must have at least one line".to_owned()),
            Pedido::new(fecha, cliente, 1, vec![]).unwrap_err()
        );
        assert_eq!(
            ModelError("Invalid number of units 0 for producto 3".to_owned()),
            Pedido::new(fecha, cliente, 1, vec![linea(3, 0, 1.0)]).unwrap_err()
        );
        Pedido::new(fecha, cliente, 1, vec![linea(3, 1, -1.0)]).unwrap_err();
        Pedido::new(fecha, cliente, 1, vec![linea(3, 1, f64::NAN)]).unwrap_err();
    }

    #[test]
    fn test_pedido_total_overflow() {
        assert_eq!(
            ModelError("Invalid total price inf".to_owned()),
            Pedido::new(
                date!(2024 - 05 - 01),
                EntityId::from(1),
                1,
                vec![linea(1, 1, 1e308), linea(2, 1, 1e308)]
            )
            .unwrap_err()
        );
    }

    #[test]
    fn test_pedidocriteria_rejects_non_finite_prices() {
        let criteria: PedidoCriteria =
            serde_urlencoded::from_str("precioDesde=1.5&precioHasta=20").unwrap();
        assert_eq!(Some(1.5), criteria.precio_desde);
        assert_eq!(Some(20.0), criteria.precio_hasta);

        serde_urlencoded::from_str::<PedidoCriteria>("precioDesde=NaN").unwrap_err();
        serde_urlencoded::from_str::<PedidoCriteria>("precioHasta=inf").unwrap_err();
    }

    #[test]
    fn test_pedidorequest_default_date() {
        let request: PedidoRequest = serde_json::from_value(serde_json::json!({
            "clienteId": 4,
            "tipoEstadoPedidoId": 1,
            "lineas": [{"productoId": 1, "unidades": 1, "precio": 3.0}],
        }))
        .unwrap();
        let pedido = request.into_pedido(date!(2025 - 01 - 31)).unwrap();
        assert_eq!(date!(2025 - 01 - 31), pedido.fecha_realizacion());

        let json = serde_json::to_value(&pedido).unwrap();
        assert_eq!("2025-01-31", json["fechaRealizacion"]);
        assert_eq!(3.0, json["precio"]);
    }
}
