//! The durable "currently selected" checkout address.

use dzcart_delivery::Address;
use dzcart_store::{read_record, write_record, DeviceStore, StoreKey};

/// Keeps the selected shipping address consistent across reloads.
///
/// The persisted copy obeys two rules, enforced here and nowhere else:
/// it is always structurally complete, and at the time it was saved it
/// matched one of the account's known addresses. Restore re-checks the
/// match so an address edited or deleted elsewhere cannot resurrect.
pub struct AddressSelector<D> {
    device: D,
    selected: Address,
}

impl<D> AddressSelector<D>
where
    D: DeviceStore,
{
    /// Initialize against the list of known addresses.
    ///
    /// A saved selection is restored only if it is complete and still matches
    /// a known address by destination. Otherwise the first known address (or
    /// the empty sentinel) is selected and the stale entry is removed.
    pub fn restore(device: D, known: &[Address]) -> Self {
        let saved: Option<Address> = read_record(&device, StoreKey::SelectedAddress);

        let selected = match saved {
            Some(saved)
                if saved.is_complete()
                    && known.iter().any(|k| k.same_destination(&saved)) =>
            {
                saved
            }
            Some(stale) => {
                tracing::debug!(
                    commune = %stale.commune,
                    "saved address selection no longer matches a known address; discarding"
                );
                Self::remove_saved(&device);
                Self::first_or_sentinel(known)
            }
            None => Self::first_or_sentinel(known),
        };

        Self { device, selected }
    }

    /// Change the selection.
    ///
    /// Complete addresses are persisted; the sentinel and incomplete
    /// addresses clear any saved entry instead (incomplete data must never
    /// be found in storage).
    pub fn select(&mut self, address: Address) {
        if address.is_empty_sentinel() || !address.is_complete() {
            Self::remove_saved(&self.device);
        } else if let Err(err) = write_record(&self.device, StoreKey::SelectedAddress, &address) {
            tracing::warn!(%err, "failed to persist selected address");
        }

        self.selected = address;
    }

    pub fn selected(&self) -> &Address {
        &self.selected
    }

    pub fn is_complete(&self) -> bool {
        self.selected.is_complete()
    }

    fn first_or_sentinel(known: &[Address]) -> Address {
        known.first().cloned().unwrap_or_else(Address::empty)
    }

    fn remove_saved(device: &D) {
        if let Err(err) = device.remove(StoreKey::SelectedAddress) {
            tracing::warn!(%err, "failed to remove saved address selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use dzcart_store::MemoryStore;

    fn address(commune: &str) -> Address {
        Address::home(
            "Amina B",
            "0550000000",
            "16",
            "Alger",
            commune,
            format!("12 rue, {commune}"),
            400,
        )
    }

    fn saved_selection(device: &MemoryStore) -> Option<Address> {
        read_record(device, StoreKey::SelectedAddress)
    }

    #[test]
    fn selecting_a_complete_address_persists_it() {
        let device = Arc::new(MemoryStore::new());
        let mut selector = AddressSelector::restore(device.clone(), &[]);

        selector.select(address("Hydra"));

        assert_eq!(selector.selected().commune, "Hydra");
        assert_eq!(saved_selection(&device).unwrap().commune, "Hydra");
    }

    #[test]
    fn selecting_the_sentinel_clears_the_saved_entry() {
        let device = Arc::new(MemoryStore::new());
        let mut selector = AddressSelector::restore(device.clone(), &[]);

        selector.select(address("Hydra"));
        selector.select(Address::empty());

        assert!(selector.selected().is_empty_sentinel());
        assert!(saved_selection(&device).is_none());
    }

    #[test]
    fn incomplete_selection_is_never_persisted() {
        let device = Arc::new(MemoryStore::new());
        let mut selector = AddressSelector::restore(device.clone(), &[]);

        selector.select(address("Hydra"));

        let mut incomplete = address("Hydra");
        incomplete.commune = String::new();
        selector.select(incomplete);

        // In-memory selection follows the caller; storage does not.
        assert!(!selector.is_complete());
        assert!(saved_selection(&device).is_none());
    }

    #[test]
    fn restore_returns_the_saved_selection_when_it_matches_a_known_address() {
        let device = Arc::new(MemoryStore::new());
        let known = vec![address("Bab El Oued"), address("Hydra")];

        {
            let mut selector = AddressSelector::restore(device.clone(), &known);
            selector.select(known[1].clone());
        }

        let selector = AddressSelector::restore(device.clone(), &known);
        assert_eq!(selector.selected().commune, "Hydra");
    }

    #[test]
    fn restore_falls_back_to_first_known_and_removes_a_stale_selection() {
        let device = Arc::new(MemoryStore::new());

        // Saved against an old address list.
        write_record(&*device, StoreKey::SelectedAddress, &address("Oran Centre")).unwrap();

        let known = vec![address("Bab El Oued"), address("Hydra")];
        let selector = AddressSelector::restore(device.clone(), &known);

        assert_eq!(selector.selected().commune, "Bab El Oued");
        assert!(saved_selection(&device).is_none());
    }

    #[test]
    fn restore_with_no_known_addresses_selects_the_sentinel() {
        let device = Arc::new(MemoryStore::new());
        let selector = AddressSelector::restore(device.clone(), &[]);

        assert!(selector.selected().is_empty_sentinel());
        assert!(!selector.is_complete());
    }

    #[test]
    fn corrupt_saved_selection_is_discarded_and_falls_back() {
        let device = Arc::new(MemoryStore::new());
        device
            .put(StoreKey::SelectedAddress, "][not json".to_string())
            .unwrap();

        let known = vec![address("Bab El Oued")];
        let selector = AddressSelector::restore(device.clone(), &known);

        assert_eq!(selector.selected().commune, "Bab El Oued");
        assert!(device.get(StoreKey::SelectedAddress).unwrap().is_none());
    }

    #[test]
    fn incomplete_saved_selection_is_treated_as_stale() {
        let device = Arc::new(MemoryStore::new());

        let mut incomplete = address("Hydra");
        incomplete.address_line = String::new();
        write_record(&*device, StoreKey::SelectedAddress, &incomplete).unwrap();

        let known = vec![address("Bab El Oued"), address("Hydra")];
        let selector = AddressSelector::restore(device.clone(), &known);

        assert_eq!(selector.selected().commune, "Bab El Oued");
        assert!(saved_selection(&device).is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_field() -> impl Strategy<Value = String> {
            prop_oneof![
                Just(String::new()),
                Just("  ".to_string()),
                "[a-z]{1,8}".prop_map(|s| s),
            ]
        }

        proptest! {
            /// After any sequence of selections, storage never holds an
            /// incomplete address.
            #[test]
            fn storage_never_holds_an_incomplete_address(
                fields in prop::collection::vec((arb_field(), arb_field(), arb_field()), 1..12),
            ) {
                let device = Arc::new(MemoryStore::new());
                let mut selector = AddressSelector::restore(device.clone(), &[]);

                for (wilaya, commune, line) in fields {
                    let mut candidate = address("seed");
                    candidate.wilaya_value = wilaya;
                    candidate.commune = commune;
                    candidate.address_line = line;
                    selector.select(candidate);

                    if let Some(saved) = saved_selection(&device) {
                        prop_assert!(saved.is_complete());
                    }
                }
            }
        }
    }
}
