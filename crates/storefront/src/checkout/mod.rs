//! Checkout flow.
//!
//! Collects and validates shipping details, then drives a single attempt at
//! payment completion:
//!
//! `Filling -> Validating -> (Invalid -> Filling) | (Valid -> Processing)
//! -> (Failed -> Filling) | (Succeeded -> Completed)`
//!
//! Validation is instantaneous inside [`CheckoutFlow::submit`]; the
//! observable states are `Filling`, `Processing`, and `Completed`. The
//! re-entrancy guard on `Processing` is the one concurrency concern: a
//! second submit while a charge is in flight dispatches nothing, since a
//! duplicate charge is the primary failure mode to avoid.

mod form;

pub use form::{Field, ShippingDetails, ShippingForm};

use chrono::{DateTime, Utc};
use encore_core::{OrderId, Price};
use rand::Rng;
use tracing::{info, instrument, warn};

use crate::auth::{AuthProvider, LoginRedirect};
use crate::cart::{CartStore, LineItem};
use crate::payment::{ChargeRequest, PaymentGateway};

/// Path the login flow returns to after authentication.
pub const CHECKOUT_PATH: &str = "/checkout";

/// Order confirmation produced on successful completion.
///
/// Ephemeral and display-only: it carries the generated identifier, a
/// snapshot of the charged line items, and the total, and is not persisted
/// beyond the current session.
#[derive(Debug, Clone)]
pub struct Order {
    /// Generated confirmation identifier.
    pub id: OrderId,
    /// Line items as they were at the moment of purchase.
    pub items: Vec<LineItem>,
    /// Total charged.
    pub total: Price,
    /// When the order completed.
    pub placed_at: DateTime<Utc>,
}

/// Observable checkout state.
#[derive(Debug, Clone)]
pub enum CheckoutState {
    /// Collecting shipping details.
    Filling,
    /// A payment attempt is in flight.
    Processing,
    /// Payment confirmed; holds the order confirmation.
    Completed(Order),
}

/// What to present when checkout is entered.
#[derive(Debug, Clone)]
pub enum Gate {
    /// Unauthenticated: redirect to the external login flow. The URL carries
    /// the checkout path so the user returns here after authenticating.
    LoginRequired {
        /// Fully built login URL.
        login_url: String,
    },
    /// Nothing to check out and no order completed this session.
    EmptyCart,
    /// Render the form (or the confirmation if already completed).
    Ready,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// One or more fields failed validation; messages are on the form.
    Invalid,
    /// The cart has no line items.
    EmptyCart,
    /// A payment attempt is already in flight; nothing was dispatched.
    AlreadyProcessing,
    /// The payment collaborator reported a failure; the cart is unchanged.
    Failed {
        /// User-visible failure message.
        message: String,
    },
    /// Payment confirmed; the cart has been cleared.
    Completed {
        /// The generated order identifier.
        order_id: OrderId,
    },
}

/// The checkout state machine.
pub struct CheckoutFlow {
    state: CheckoutState,
    form: ShippingForm,
    payment_error: Option<String>,
}

impl CheckoutFlow {
    /// Create a checkout flow with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CheckoutState::Filling,
            form: ShippingForm::new(),
            payment_error: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The shipping form being filled.
    #[must_use]
    pub fn form(&self) -> &ShippingForm {
        &self.form
    }

    /// Mutable access to the shipping form (for per-edit validation).
    pub fn form_mut(&mut self) -> &mut ShippingForm {
        &mut self.form
    }

    /// The completed order, if checkout has succeeded.
    #[must_use]
    pub fn order(&self) -> Option<&Order> {
        match &self.state {
            CheckoutState::Completed(order) => Some(order),
            _ => None,
        }
    }

    /// The last payment failure message, if any.
    #[must_use]
    pub fn payment_error(&self) -> Option<&str> {
        self.payment_error.as_deref()
    }

    /// Decide what to present when checkout is entered.
    pub fn enter(
        &self,
        cart: &CartStore,
        auth: &impl AuthProvider,
        login: &LoginRedirect,
    ) -> Gate {
        if !auth.status().authenticated {
            return Gate::LoginRequired {
                login_url: login.login_url(CHECKOUT_PATH),
            };
        }

        if cart.is_empty() && !matches!(self.state, CheckoutState::Completed(_)) {
            return Gate::EmptyCart;
        }

        Gate::Ready
    }

    /// Attempt to complete checkout.
    ///
    /// With all fields valid and at least one line item, dispatches exactly
    /// one charge. On success the order identifier is generated, the cart is
    /// cleared, and the flow moves to `Completed`; on failure the message is
    /// surfaced and the flow returns to `Filling` with the cart untouched so
    /// the user may retry.
    #[instrument(skip_all)]
    pub async fn submit(
        &mut self,
        cart: &mut CartStore,
        gateway: &dyn PaymentGateway,
    ) -> SubmitOutcome {
        match &self.state {
            CheckoutState::Processing => return SubmitOutcome::AlreadyProcessing,
            CheckoutState::Completed(order) => {
                return SubmitOutcome::Completed {
                    order_id: order.id.clone(),
                };
            }
            CheckoutState::Filling => {}
        }

        if cart.is_empty() {
            return SubmitOutcome::EmptyCart;
        }

        let Some(details) = self.form.validate() else {
            return SubmitOutcome::Invalid;
        };

        let total = cart.subtotal();
        let Some(amount_minor) = total.minor_units() else {
            let message = "order total exceeds the supported charge amount".to_owned();
            self.payment_error = Some(message.clone());
            return SubmitOutcome::Failed { message };
        };

        self.state = CheckoutState::Processing;
        self.payment_error = None;

        let request = ChargeRequest {
            amount_minor,
            currency: total.currency_code,
            description: format!("Encore merch order ({} items)", cart.item_count()),
            shipping: details,
        };

        match gateway.charge(&request).await {
            Ok(confirmation) => {
                let order = Order {
                    id: generate_order_id(),
                    items: cart.items().to_vec(),
                    total,
                    placed_at: Utc::now(),
                };
                cart.clear();

                info!(
                    order_id = %order.id,
                    confirmation_id = %confirmation.confirmation_id,
                    "Order completed"
                );

                let order_id = order.id.clone();
                self.state = CheckoutState::Completed(order);
                SubmitOutcome::Completed { order_id }
            }
            Err(e) => {
                warn!(error = %e, "Payment attempt failed");
                let message = e.to_string();
                self.payment_error = Some(message.clone());
                self.state = CheckoutState::Filling;
                SubmitOutcome::Failed { message }
            }
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a display order identifier (`ORD-` + zero-padded 6-digit number).
fn generate_order_id() -> OrderId {
    OrderId::new(rand::rng().random_range(0..=999_999))
}
