//! Confirmation step in front of purchases of age-restricted products.

use serde::{Deserialize, Serialize};

use crate::model::{DisplayProduct, ProductId};

pub const AGE_GATE_TITLE: &str = "Age Verification Required";
pub const AGE_GATE_CONFIRM_LABEL: &str = "Scan ID";
pub const AGE_GATE_CANCEL_LABEL: &str = "Cancel";
pub const MINIMUM_AGE: u8 = 21;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PurchaseIntent {
    /// Hand the product to payment. `age_verified` is set when the buyer went
    /// through the gate.
    Proceed { product_id: ProductId, age_verified: bool },
    AwaitingAgeVerification { product_id: ProductId },
    Cancelled { product_id: ProductId },
    /// Another gate is already on screen.
    Blocked { product_id: ProductId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGatePrompt {
    pub product_id: ProductId,
    pub product_name: String,
}

impl AgeGatePrompt {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "This product ({}) is age-restricted. You must be {MINIMUM_AGE}+ years of age. \
             Please use the ID scanner on the machine to verify your age.",
            self.product_name
        )
    }
}

/// Holds at most one open prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeGate {
    open: Option<AgeGatePrompt>,
}

impl AgeGate {
    #[must_use]
    pub const fn prompt(&self) -> Option<&AgeGatePrompt> {
        self.open.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn request_purchase(&mut self, product: &DisplayProduct) -> PurchaseIntent {
        if self.open.is_some() {
            return PurchaseIntent::Blocked { product_id: product.id.clone() };
        }

        if !product.is_age_restricted {
            return PurchaseIntent::Proceed { product_id: product.id.clone(), age_verified: false };
        }

        self.open = Some(AgeGatePrompt {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
        });
        PurchaseIntent::AwaitingAgeVerification { product_id: product.id.clone() }
    }

    /// Closes the gate and lets the purchase continue in the same step.
    pub fn confirm(&mut self) -> Option<PurchaseIntent> {
        self.open.take().map(|prompt| PurchaseIntent::Proceed {
            product_id: prompt.product_id,
            age_verified: true,
        })
    }

    pub fn cancel(&mut self) -> Option<PurchaseIntent> {
        self.open
            .take()
            .map(|prompt| PurchaseIntent::Cancelled { product_id: prompt.product_id })
    }

    /// Drops any open prompt without producing an intent.
    pub fn dismiss(&mut self) {
        self.open = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AssetKey;

    fn product(id: &str, restricted: bool) -> DisplayProduct {
        DisplayProduct {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: "Drinks".into(),
            price: 4.0,
            image_key: AssetKey::Placeholder,
            is_age_restricted: restricted,
            stock: 2,
        }
    }

    #[test]
    fn test_unrestricted_proceeds_immediately() {
        let mut gate = AgeGate::default();
        let intent = gate.request_purchase(&product("p1", false));
        assert_eq!(
            intent,
            PurchaseIntent::Proceed { product_id: ProductId::new("p1"), age_verified: false }
        );
        assert!(!gate.is_open());
    }

    #[test]
    fn test_restricted_opens_gate_then_confirm() {
        let mut gate = AgeGate::default();
        let intent = gate.request_purchase(&product("p2", true));
        assert_eq!(intent, PurchaseIntent::AwaitingAgeVerification { product_id: ProductId::new("p2") });
        assert_eq!(gate.prompt().map(|p| p.product_name.as_str()), Some("Product p2"));

        let confirmed = gate.confirm();
        assert_eq!(
            confirmed,
            Some(PurchaseIntent::Proceed { product_id: ProductId::new("p2"), age_verified: true })
        );
        assert!(!gate.is_open());
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn test_cancel_dismisses_without_purchase() {
        let mut gate = AgeGate::default();
        gate.request_purchase(&product("p2", true));
        assert_eq!(gate.cancel(), Some(PurchaseIntent::Cancelled { product_id: ProductId::new("p2") }));
        assert!(!gate.is_open());
        assert_eq!(gate.cancel(), None);
    }

    #[test]
    fn test_only_one_gate_at_a_time() {
        let mut gate = AgeGate::default();
        gate.request_purchase(&product("p2", true));
        let second = gate.request_purchase(&product("p3", true));
        assert_eq!(second, PurchaseIntent::Blocked { product_id: ProductId::new("p3") });
        assert_eq!(gate.prompt().map(|p| p.product_id.as_str()), Some("p2"));

        let unrestricted = gate.request_purchase(&product("p4", false));
        assert!(matches!(unrestricted, PurchaseIntent::Blocked { .. }));
    }

    #[test]
    fn test_prompt_message_names_product() {
        let prompt = AgeGatePrompt { product_id: ProductId::new("p5"), product_name: "Lager".into() };
        assert_eq!(
            prompt.message(),
            "This product (Lager) is age-restricted. You must be 21+ years of age. \
             Please use the ID scanner on the machine to verify your age."
        );
    }
}
