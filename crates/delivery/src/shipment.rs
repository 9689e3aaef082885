use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Home/parcel delivery order type on the provider side.
pub const TYPE_PARCEL: u32 = 1;

/// One parcel submission to the delivery provider.
///
/// Field names follow the provider's wire format verbatim, so this struct
/// serializes directly into the `create`/`update` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Order id on our side, echoed back by the provider.
    pub reference: String,
    pub client: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_2: Option<String>,
    pub adresse: String,
    pub wilaya_id: u32,
    pub commune: String,
    /// Total payable on delivery, smallest currency unit.
    pub montant: u64,
    /// Human-readable description: `"Name (x2), Other (x1)"`.
    pub produit: String,
    pub type_id: u32,
    /// Declared weight in the provider's unit (kg), rounded up.
    pub poids: u32,
    pub stop_desk: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_code: Option<String>,
    pub stock: u8,
    pub can_open: u8,
}

impl ShipmentRequest {
    /// Build the address-dependent half of a request.
    ///
    /// The caller fills in amount, description and weight (they depend on the
    /// order lines, not the address).
    pub fn for_destination(reference: impl Into<String>, address: &Address) -> Self {
        Self {
            reference: reference.into(),
            client: address.full_name.clone(),
            phone: address.phone.clone(),
            phone_2: address.second_phone.clone(),
            adresse: address.address_line.clone(),
            wilaya_id: address.wilaya_id(),
            commune: address.commune.clone(),
            montant: 0,
            produit: String::new(),
            type_id: TYPE_PARCEL,
            poids: 0,
            stop_desk: u8::from(address.stop_desk),
            station_code: if address.stop_desk {
                address.station_code.clone()
            } else {
                None
            },
            stock: 0,
            can_open: 0,
        }
    }

    /// Whether this request may be sent to the provider.
    ///
    /// A request built from the empty sentinel address (missing order address)
    /// is representable but must not be submitted.
    pub fn is_submittable(&self) -> bool {
        self.wilaya_id != 0 && !self.commune.trim().is_empty() && !self.adresse.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address::home("Amina B", "0550000000", "16", "Alger", "Bab El Oued", "12 rue des Frères", 400)
    }

    #[test]
    fn destination_fields_are_carried_verbatim() {
        let request = ShipmentRequest::for_destination("order-1", &address());
        assert_eq!(request.client, "Amina B");
        assert_eq!(request.adresse, "12 rue des Frères");
        assert_eq!(request.wilaya_id, 16);
        assert_eq!(request.commune, "Bab El Oued");
        assert_eq!(request.stop_desk, 0);
        assert_eq!(request.station_code, None);
        assert_eq!(request.type_id, TYPE_PARCEL);
    }

    #[test]
    fn stop_desk_address_sets_flag_and_station() {
        let address = address().at_station("16A", "Agence Alger Centre").unwrap();
        let request = ShipmentRequest::for_destination("order-1", &address);
        assert_eq!(request.stop_desk, 1);
        assert_eq!(request.station_code.as_deref(), Some("16A"));
    }

    #[test]
    fn sentinel_destination_is_not_submittable() {
        let request = ShipmentRequest::for_destination("order-1", &Address::empty());
        assert!(!request.is_submittable());
    }

    #[test]
    fn complete_destination_is_submittable() {
        let request = ShipmentRequest::for_destination("order-1", &address());
        assert!(request.is_submittable());
    }
}
