use serde::{Deserialize, Serialize};

use dzcart_core::{DomainError, DomainResult, ValueObject};

/// A shipping address in the provider's wilaya/commune model.
///
/// An address is **complete** only when wilaya, commune and the free-text line
/// are all non-empty; an incomplete address must never be used as the active
/// checkout address. `Address::empty()` is the explicit "no address" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Address {
    pub full_name: String,
    pub phone: String,
    pub second_phone: Option<String>,
    /// Region code as submitted by the address form (the provider wants it numeric).
    pub wilaya_value: String,
    /// Region display name.
    pub wilaya_label: String,
    pub commune: String,
    pub address_line: String,
    /// Stop-desk pickup instead of home delivery.
    pub stop_desk: bool,
    pub station_code: Option<String>,
    pub station_name: Option<String>,
    /// Shipping price for this destination, in smallest currency unit.
    pub base_shipping_price: u64,
}

impl Address {
    /// The explicit empty sentinel. Never complete, never persisted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Home-delivery address builder.
    pub fn home(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        wilaya_value: impl Into<String>,
        wilaya_label: impl Into<String>,
        commune: impl Into<String>,
        address_line: impl Into<String>,
        base_shipping_price: u64,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            second_phone: None,
            wilaya_value: wilaya_value.into(),
            wilaya_label: wilaya_label.into(),
            commune: commune.into(),
            address_line: address_line.into(),
            stop_desk: false,
            station_code: None,
            station_name: None,
            base_shipping_price,
        }
    }

    /// Turn a home-delivery address into a stop-desk one.
    ///
    /// Station code and name are required together with the flag.
    pub fn at_station(
        mut self,
        station_code: impl Into<String>,
        station_name: impl Into<String>,
    ) -> DomainResult<Self> {
        let code = station_code.into();
        let name = station_name.into();

        if code.trim().is_empty() || name.trim().is_empty() {
            return Err(DomainError::validation(
                "stop-desk delivery requires a station code and name",
            ));
        }

        self.stop_desk = true;
        self.station_code = Some(code);
        self.station_name = Some(name);
        Ok(self)
    }

    pub fn with_second_phone(mut self, phone: impl Into<String>) -> Self {
        self.second_phone = Some(phone.into());
        self
    }

    /// Structural completeness: wilaya, commune and the address line are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.wilaya_value.trim().is_empty()
            && !self.commune.trim().is_empty()
            && !self.address_line.trim().is_empty()
    }

    pub fn is_empty_sentinel(&self) -> bool {
        self == &Self::empty()
    }

    /// Destination identity: exact equality of wilaya value, commune and line.
    ///
    /// This is the match used when restoring a saved selection against the list
    /// of known addresses (names and phones may have been edited in place).
    pub fn same_destination(&self, other: &Address) -> bool {
        self.wilaya_value == other.wilaya_value
            && self.commune == other.commune
            && self.address_line == other.address_line
    }

    /// Numeric region code for the provider payload; 0 when unparseable.
    pub fn wilaya_id(&self) -> u32 {
        self.wilaya_value.trim().parse().unwrap_or(0)
    }
}

impl ValueObject for Address {}
