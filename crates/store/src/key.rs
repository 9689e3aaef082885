//! Well-known device store keys.

/// The records a device may hold.
///
/// Key names are stable: they are the on-device storage identity and must not
/// change across releases.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Guest cart items (JSON array of cart items).
    GuestCart,
    /// The currently selected checkout address.
    SelectedAddress,
    /// Addresses a guest has entered on this device.
    GuestAddresses,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::GuestCart => "guest_cart",
            StoreKey::SelectedAddress => "selected_address",
            StoreKey::GuestAddresses => "guest_addresses",
        }
    }
}

impl core::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
