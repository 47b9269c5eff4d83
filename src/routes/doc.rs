use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartItemResponse, UpdateQuantityRequest},
        invoices::{CreateInvoiceRequest, InvoiceResponse},
        orders::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest},
        reviews::{CreateReviewRequest, ReviewResponse},
        users::{CreateUserRequest, RoleResponse, UserResponse},
    },
    response::{CartInserted, ErrorBody, Inserted, Success, SuccessMessage, UpdateOutcome},
    routes::{cart, invoices, orders, params, products, reviews, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        users::create_user,
        users::get_role_by_email,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        reviews::create_review,
        reviews::list_reviews_for_product,
        cart::add_to_cart,
        cart::list_guest_cart,
        cart::update_quantity,
        cart::remove_cart_item,
        orders::create_order,
        orders::list_orders_by_email,
        orders::list_all_orders,
        orders::update_order_status,
        orders::delete_order,
        invoices::list_invoices_by_email,
        invoices::create_invoice
    ),
    components(
        schemas(
            CreateUserRequest,
            UserResponse,
            RoleResponse,
            CreateReviewRequest,
            ReviewResponse,
            AddToCartRequest,
            UpdateQuantityRequest,
            CartItemResponse,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            OrderResponse,
            CreateInvoiceRequest,
            InvoiceResponse,
            params::EmailQuery,
            ErrorBody,
            Success,
            SuccessMessage,
            Inserted,
            CartInserted,
            UpdateOutcome
        )
    ),
    tags(
        (name = "Users", description = "User endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Reviews", description = "Review endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Invoices", description = "Invoice endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
