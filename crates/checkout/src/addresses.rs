//! Guest address book and its transfer to an account.

use dzcart_account::AccountStore;
use dzcart_core::UserId;
use dzcart_delivery::Address;
use dzcart_store::{read_record, write_record, DeviceStore, StoreError, StoreKey};

use crate::reconciler::ReconcileError;

/// Addresses a guest has entered on this device.
///
/// Complete addresses only; drafts stay in the form. Like the guest cart,
/// the book is owned by the device until sign-in, at which point
/// [`GuestAddressBook::merge_into_account`] moves it server-side and deletes
/// the device copy.
pub struct GuestAddressBook<D> {
    device: D,
}

impl<D> GuestAddressBook<D>
where
    D: DeviceStore,
{
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// All addresses on the device (a corrupt record reads as empty).
    pub fn list(&self) -> Vec<Address> {
        read_record(&self.device, StoreKey::GuestAddresses).unwrap_or_default()
    }

    /// Append a complete address.
    pub fn add(&self, address: Address) -> Result<Vec<Address>, StoreError> {
        if !address.is_complete() {
            // Same policy as the account side: incomplete data is never stored.
            tracing::debug!("refusing to store incomplete guest address");
            return Ok(self.list());
        }

        let mut addresses = self.list();
        addresses.push(address);
        write_record(&self.device, StoreKey::GuestAddresses, &addresses)?;
        Ok(addresses)
    }

    /// Move the guest addresses into the account at sign-in.
    ///
    /// Same shape as the cart merge: every remote write must succeed before
    /// the device copy is deleted, and any failure leaves it intact. An
    /// address the account already has (same destination) is skipped rather
    /// than duplicated.
    pub async fn merge_into_account<A>(
        &self,
        account: &A,
        user: UserId,
    ) -> Result<Vec<Address>, ReconcileError>
    where
        A: AccountStore,
    {
        let guest = self.list();
        if guest.is_empty() {
            return Ok(account.fetch_addresses(user).await?);
        }

        let mut known = account.fetch_addresses(user).await?;

        for address in guest {
            if known.iter().any(|k| k.same_destination(&address)) {
                continue;
            }
            let saved = account.save_address(user, address).await?;
            known.push(saved);
        }

        self.device.remove(StoreKey::GuestAddresses)?;

        tracing::info!(%user, addresses = known.len(), "merged guest addresses into account");
        Ok(known)
    }
}
