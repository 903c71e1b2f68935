//! Payment-authorization audit trail: intent, cart, signed payment mandate,
//! execution receipt. Each step consumes the previous step's id and total;
//! the signatures are locally computed content hashes standing in for real
//! cryptographic authorization.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use super::validation_message;
use crate::error::{PlannerError, Result};
use crate::events::{event_channel, EventStream, PlanEvent};
use crate::types::TripRequest;

const DEFAULT_WALLET_BALANCE: f64 = 10_000.00;
const TAX_RATE: f64 = 0.08;
const PROCESSING_FEE: f64 = 25.00;

/// Step 1: what the agent intends to purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentMandate {
    pub intent_id: String,
    pub agent_id: String,
    pub user_id: String,
    pub description: String,
    pub timestamp: String,
    pub items_to_purchase: Vec<String>,
    pub estimated_total: f64,
}

/// One line of the itemized cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub item_id: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub vendor: String,
}

/// Step 2: itemized breakdown with taxes and fees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMandate {
    pub cart_id: String,
    pub intent_id: String,
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub taxes: f64,
    pub fees: f64,
    pub total: f64,
    pub timestamp: String,
}

/// Outcome of the authorization check. Terminal either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MandateStatus {
    Authorized,
    Denied,
}

/// Step 3: signed payment authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMandate {
    pub mandate_id: String,
    pub cart_id: String,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub timestamp: String,
    pub signature: String,
    pub status: MandateStatus,
}

/// Steps 4 and 5: execution record with the full audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub receipt_id: String,
    pub mandate_id: String,
    pub amount_paid: f64,
    pub currency: String,
    pub timestamp: String,
    pub items_purchased: Vec<CartItem>,
    pub status: String,
    pub audit_hash: String,
}

/// Runs the four-step mandate sequence against a mock wallet.
#[derive(Debug, Clone)]
pub struct MandatePlanner {
    user_id: String,
    agent_id: String,
    wallet: Arc<Mutex<f64>>,
}

impl Default for MandatePlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MandatePlanner {
    /// Wallet balance comes from `MANDATE_WALLET_BALANCE` when set.
    pub fn new() -> Self {
        let balance = std::env::var("MANDATE_WALLET_BALANCE")
            .ok()
            .and_then(|value| value.parse::<f64>().ok())
            .unwrap_or(DEFAULT_WALLET_BALANCE);
        Self::with_balance(balance)
    }

    pub fn with_balance(balance: f64) -> Self {
        Self {
            user_id: "demo_user_001".to_string(),
            agent_id: "mandate_travel_agent_001".to_string(),
            wallet: Arc::new(Mutex::new(balance)),
        }
    }

    pub fn wallet_balance(&self) -> f64 {
        *self.wallet.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn sign(&self, data: &str) -> String {
        content_hash(&format!("{data}{}{}", self.user_id, Utc::now().to_rfc3339()))
    }

    fn create_intent(&self, request: &TripRequest) -> IntentMandate {
        IntentMandate {
            intent_id: short_id("intent"),
            agent_id: self.agent_id.clone(),
            user_id: self.user_id.clone(),
            description: format!(
                "{}-day trip to {} for {} travelers",
                request.duration_days, request.destination, request.travelers
            ),
            timestamp: Utc::now().to_rfc3339(),
            items_to_purchase: vec![
                format!("Round-trip flights to {}", request.destination),
                format!(
                    "{} hotel for {} nights",
                    request.hotel_preference, request.duration_days
                ),
                format!("Activities: {}", request.interests_label()),
            ],
            estimated_total: request.budget,
        }
    }

    fn build_cart(&self, intent: &IntentMandate, request: &TripRequest) -> CartMandate {
        let flight_price = request.budget * 0.35;
        let hotel_price = request.budget * 0.30;
        let activities_price = request.budget * 0.20;

        let items = vec![
            CartItem {
                item_id: short_id("flight"),
                name: format!("Round-trip flights to {}", request.destination),
                description: format!("Economy class for {} travelers", request.travelers),
                quantity: request.travelers,
                unit_price: flight_price / f64::from(request.travelers),
                total_price: flight_price,
                vendor: "GlobalAir".to_string(),
            },
            CartItem {
                item_id: short_id("hotel"),
                name: format!("{} hotel", request.hotel_preference),
                description: format!(
                    "{} nights in {}",
                    request.duration_days, request.destination
                ),
                quantity: request.duration_days,
                unit_price: hotel_price / f64::from(request.duration_days),
                total_price: hotel_price,
                vendor: "TravelStay".to_string(),
            },
            CartItem {
                item_id: short_id("activities"),
                name: "Activities package".to_string(),
                description: format!("Curated activities: {}", request.interests_label()),
                quantity: 1,
                unit_price: activities_price,
                total_price: activities_price,
                vendor: "LocalExperiences".to_string(),
            },
        ];

        let subtotal: f64 = items.iter().map(|item| item.total_price).sum();
        let taxes = subtotal * TAX_RATE;
        let fees = PROCESSING_FEE;

        CartMandate {
            cart_id: short_id("cart"),
            intent_id: intent.intent_id.clone(),
            items,
            subtotal,
            taxes,
            fees,
            total: subtotal + taxes + fees,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    fn authorize_payment(&self, cart: &CartMandate) -> PaymentMandate {
        let mandate_id = short_id("mandate");
        let signature = self.sign(&format!(
            "{mandate_id}{}{}{}",
            cart.cart_id, cart.total, self.user_id
        ));

        let status = if cart.total <= self.wallet_balance() {
            MandateStatus::Authorized
        } else {
            MandateStatus::Denied
        };

        PaymentMandate {
            mandate_id,
            cart_id: cart.cart_id.clone(),
            user_id: self.user_id.clone(),
            amount: cart.total,
            currency: "USD".to_string(),
            payment_method: "mandate_wallet".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            signature,
            status,
        }
    }

    fn execute_transaction(&self, mandate: &PaymentMandate, cart: &CartMandate) -> TransactionReceipt {
        let receipt_id = short_id("receipt");
        let timestamp = Utc::now().to_rfc3339();
        let audit_hash = content_hash(&format!(
            "{receipt_id}{}{}{timestamp}",
            mandate.mandate_id, mandate.amount
        ));

        {
            let mut balance = self
                .wallet
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *balance -= mandate.amount;
        }

        TransactionReceipt {
            receipt_id,
            mandate_id: mandate.mandate_id.clone(),
            amount_paid: mandate.amount,
            currency: mandate.currency.clone(),
            timestamp,
            items_purchased: cart.items.clone(),
            status: "completed".to_string(),
            audit_hash,
        }
    }

    fn result_payload(
        &self,
        request: &TripRequest,
        intent: &IntentMandate,
        cart: &CartMandate,
        mandate: &PaymentMandate,
        receipt: &TransactionReceipt,
    ) -> Value {
        json!({
            "success": true,
            "trip_details": {
                "destination": request.destination,
                "duration": request.duration_days,
                "travelers": request.travelers,
                "total_cost": cart.total
            },
            "payment_details": {
                "receipt_id": receipt.receipt_id,
                "amount_paid": receipt.amount_paid,
                "currency": receipt.currency,
                "audit_hash": receipt.audit_hash,
                "timestamp": receipt.timestamp
            },
            "mandates": {
                "intent_mandate": intent,
                "cart_mandate": cart,
                "payment_mandate": mandate
            },
            "items_purchased": receipt.items_purchased,
            "wallet_balance": self.wallet_balance()
        })
    }

    /// Run the whole sequence without streaming. Denial is a terminal error.
    pub fn run(&self, request: &TripRequest) -> Result<Value> {
        let violations = request.validate();
        if !violations.is_empty() {
            return Err(PlannerError::InvalidRequest(validation_message(&violations)));
        }

        let intent = self.create_intent(request);
        let cart = self.build_cart(&intent, request);
        let mandate = self.authorize_payment(&cart);

        if mandate.status != MandateStatus::Authorized {
            warn!(
                required = cart.total,
                balance = self.wallet_balance(),
                "payment denied"
            );
            return Err(PlannerError::PaymentDenied(
                "Insufficient funds".to_string(),
            ));
        }

        let receipt = self.execute_transaction(&mandate, &cart);
        info!(
            receipt_id = %receipt.receipt_id,
            amount = receipt.amount_paid,
            "transaction executed"
        );
        Ok(self.result_payload(request, &intent, &cart, &mandate, &receipt))
    }

    /// Streamed variant: five labelled steps, then one terminal event.
    pub fn plan_stream(&self, request: TripRequest) -> EventStream {
        let planner = self.clone();
        let (sink, stream) = event_channel(32);

        tokio::spawn(async move {
            let violations = request.validate();
            if !violations.is_empty() {
                sink.emit(PlanEvent::error(validation_message(&violations)))
                    .await;
                return;
            }

            if !sink
                .log_with_data(
                    "MandateProtocol",
                    format!(
                        "Initiating autonomous payment authorization for {} trip",
                        request.destination
                    ),
                    json!({"protocol_version": "1.0", "agent_id": planner.agent_id}),
                )
                .await
            {
                return;
            }

            let intent = planner.create_intent(&request);
            if !sink
                .log_with_data(
                    "IntentMandate",
                    format!("Step 1/5: Intent declared - {}", intent.description),
                    json!(&intent),
                )
                .await
            {
                return;
            }

            let cart = planner.build_cart(&intent, &request);
            if !sink
                .log_with_data(
                    "CartMandate",
                    format!(
                        "Step 2/5: Cart created with {} items - Total: ${:.2}",
                        cart.items.len(),
                        cart.total
                    ),
                    json!(&cart),
                )
                .await
            {
                return;
            }

            let mandate = planner.authorize_payment(&cart);
            if mandate.status != MandateStatus::Authorized {
                sink.log_with_data(
                    "PaymentMandate",
                    format!(
                        "Step 3/5: Payment denied - Insufficient funds (Required: ${:.2}, Balance: ${:.2})",
                        cart.total,
                        planner.wallet_balance()
                    ),
                    json!(&mandate),
                )
                .await;
                sink.emit(PlanEvent::error(
                    "Payment authorization denied: Insufficient funds",
                ))
                .await;
                return;
            }
            if !sink
                .log_with_data(
                    "PaymentMandate",
                    format!(
                        "Step 3/5: Payment authorized - ${:.2} (Balance: ${:.2})",
                        cart.total,
                        planner.wallet_balance()
                    ),
                    json!({
                        "mandate": &mandate,
                        "signature": format!("{}...", &mandate.signature[..16])
                    }),
                )
                .await
            {
                return;
            }

            let receipt = planner.execute_transaction(&mandate, &cart);
            if !sink
                .log_with_data(
                    "Transaction",
                    format!("Step 4/5: Transaction executed - ${:.2} charged", mandate.amount),
                    json!({
                        "receipt_id": receipt.receipt_id,
                        "audit_hash": format!("{}...", &receipt.audit_hash[..16]),
                        "items_count": cart.items.len()
                    }),
                )
                .await
            {
                return;
            }
            if !sink
                .log_with_data(
                    "Receipt",
                    "Step 5/5: Receipt generated and audit trail sealed",
                    json!({
                        "receipt_id": receipt.receipt_id,
                        "audit_hash": receipt.audit_hash,
                        "wallet_balance": planner.wallet_balance()
                    }),
                )
                .await
            {
                return;
            }

            let payload = planner.result_payload(&request, &intent, &cart, &mandate, &receipt);
            sink.emit(PlanEvent::result(payload)).await;
        });

        stream
    }
}

fn short_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &hex[..8])
}

fn content_hash(data: &str) -> String {
    let digest = Sha256::digest(data.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
