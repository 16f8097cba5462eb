use async_trait::async_trait;
use contracts::domain::a002_purchase_order::{
    CreatePurchaseOrderDto, CreatePurchaseOrderResponse, DeletePurchaseOrderRequest,
    PurchaseOrderId, PurchaseOrderListRequest, PurchaseOrderListResponse,
};
use contracts::shared::api_response::ApiStatus;
use log::{debug, info};

use crate::shared::api_utils::post_json;
use crate::shared::config::endpoints;
use crate::shared::error::AppError;
use crate::system::auth::RequestContext;

/// Remote purchase-order endpoints.
#[async_trait(?Send)]
pub trait PurchaseOrderApi {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: &PurchaseOrderListRequest,
    ) -> Result<PurchaseOrderListResponse, AppError>;

    /// Returns the new order's id when the service reports one.
    async fn create(
        &self,
        ctx: &RequestContext,
        dto: &CreatePurchaseOrderDto,
    ) -> Result<Option<PurchaseOrderId>, AppError>;

    async fn delete(&self, ctx: &RequestContext, id: &PurchaseOrderId) -> Result<(), AppError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpPurchaseOrderApi;

#[async_trait(?Send)]
impl PurchaseOrderApi for HttpPurchaseOrderApi {
    async fn list(
        &self,
        ctx: &RequestContext,
        request: &PurchaseOrderListRequest,
    ) -> Result<PurchaseOrderListResponse, AppError> {
        debug!(
            "getAllPurchaseEntry {} .. {} page {} limit {}",
            request.start_date, request.end_date, request.page, request.limit
        );
        let response: PurchaseOrderListResponse =
            post_json(endpoints::GET_ALL_PURCHASE_ENTRY, ctx, request).await?;
        response
            .meta
            .check("Failed to load purchase orders")
            .map_err(AppError::LogicalFailure)?;
        Ok(response)
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        dto: &CreatePurchaseOrderDto,
    ) -> Result<Option<PurchaseOrderId>, AppError> {
        let response: CreatePurchaseOrderResponse =
            post_json(endpoints::ADD_PURCHASE_ENTRY, ctx, dto).await?;
        response
            .meta
            .check("Failed to create purchase order")
            .map_err(AppError::LogicalFailure)?;
        info!("purchase order created for invoice {}", dto.invoice_no);
        Ok(response.id)
    }

    async fn delete(&self, ctx: &RequestContext, id: &PurchaseOrderId) -> Result<(), AppError> {
        let request = DeletePurchaseOrderRequest {
            id: id.clone(),
            location_id: ctx.location_id.clone(),
        };
        let status: ApiStatus = post_json(endpoints::DELETE_PURCHASE_ORDER, ctx, &request).await?;
        status
            .check("Failed to delete purchase order")
            .map_err(AppError::LogicalFailure)?;
        info!("purchase order {} deleted", id);
        Ok(())
    }
}
