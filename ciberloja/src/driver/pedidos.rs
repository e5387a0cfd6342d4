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

//! Operations on pedidos, whose price and lines are managed as a unit.

use crate::db::{ReadTable, WriteTable};
use crate::driver::email::send_pedido_confirmation;
use crate::driver::{Driver, entity_error};
use crate::model::{Cliente, EntityId, PageRequest, Pedido, PedidoCriteria, PedidoRequest, Record};
use ciberloja_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Places a new pedido and notifies its cliente.
    ///
    /// The pedido is not persisted unless the confirmation email is sent successfully.
    pub(crate) async fn create_pedido(self, request: PedidoRequest) -> DriverResult<Record<Pedido>> {
        let pedido = request.into_pedido(self.clock.today_utc())?;

        let mut tx = self.db.begin().await?;
        let id = Pedido::insert(tx.ex(), &pedido)
            .await
            .map_err(|e| entity_error::<Pedido>(None, e))?;
        let record = Pedido::get(tx.ex(), id).await?;
        let cliente = Cliente::get(tx.ex(), record.data.cliente_id()).await?;

        send_pedido_confirmation(
            self.mailer.as_ref(),
            self.opts.mail_from.clone(),
            &cliente.data,
            record.id,
            &record.data,
        )
        .await?;

        tx.commit().await?;
        info!("Created pedido {} for cliente {}", record.id, cliente.id);
        Ok(record)
    }

    /// Replaces the pedido `id` with the contents of `request`.
    ///
    /// The stored date is kept if the request does not carry one.
    pub(crate) async fn update_pedido(
        self,
        id: EntityId,
        request: PedidoRequest,
    ) -> DriverResult<Record<Pedido>> {
        let mut tx = self.db.begin().await?;
        let current =
            Pedido::get(tx.ex(), id).await.map_err(|e| entity_error::<Pedido>(Some(id), e))?;
        let pedido = request.into_pedido(current.data.fecha_realizacion())?;

        Pedido::update(tx.ex(), id, &pedido)
            .await
            .map_err(|e| entity_error::<Pedido>(Some(id), e))?;
        let record = Pedido::get(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Gets all the pedidos placed by `cliente_id`.
    pub(crate) async fn pedidos_by_cliente(
        self,
        cliente_id: EntityId,
    ) -> DriverResult<Vec<Record<Pedido>>> {
        let criteria = PedidoCriteria { cliente_id: Some(cliente_id), ..Default::default() };
        let result = self.find::<Pedido>(criteria, PageRequest::all()).await?;
        Ok(result.items)
    }
}
