//! In-memory contact list with a raw-text mirror.
//!
//! The book caches the server-held list. Additions and removals mutate
//! the cache only; persistence is deferred until [`ContactBook::save`],
//! which posts the raw serialization and then reloads from the server.

use mailblast_api::{ApiClient, Contact};

use crate::error::{Result, ValidationError};

/// Ordered contact cache plus the `email;nome` raw-text mirror used for
/// bulk edit.
#[derive(Debug, Default)]
pub struct ContactBook {
    contacts: Vec<Contact>,
    raw: String,
}

impl ContactBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached contacts, in insertion/load order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of cached contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// The raw `email;nome` serialization, one line per contact.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// Replaces the raw mirror only, for bulk edit. The cache catches up
    /// on the reload that follows [`ContactBook::save`].
    pub fn set_raw(&mut self, text: impl Into<String>) {
        self.raw = text.into();
    }

    /// Replaces the cache and raw mirror from the server.
    ///
    /// # Errors
    ///
    /// Returns the API error on failure; cache and mirror are left
    /// untouched in that case.
    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        let listing = api.contacts().await?;
        self.contacts = listing.contacts;
        self.raw = listing.raw_content;
        Ok(())
    }

    /// Appends a contact to the cache and regenerates the raw mirror.
    /// No server call is made; persistence is deferred to `save`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] and leaves the cache
    /// unchanged when `email` does not contain `@`.
    pub fn add(&mut self, email: &str, name: &str) -> std::result::Result<(), ValidationError> {
        if !email.contains('@') {
            return Err(ValidationError::InvalidEmail(email.to_owned()));
        }
        self.contacts
            .push(Contact::new(email.trim(), name.trim()));
        self.rebuild_raw();
        Ok(())
    }

    /// Removes the contact at `index`, keeping the relative order of the
    /// rest. Out-of-range indices are a silent no-op returning `None`.
    pub fn remove(&mut self, index: usize) -> Option<Contact> {
        if index >= self.contacts.len() {
            return None;
        }
        let removed = self.contacts.remove(index);
        self.rebuild_raw();
        Some(removed)
    }

    /// Posts the raw text to the server and, on success, reloads the
    /// cache from server truth. Purely-local edits not reflected by the
    /// server are discarded by that reload.
    ///
    /// # Errors
    ///
    /// Returns the API error on failure, leaving cache and mirror
    /// unchanged.
    pub async fn save(&mut self, api: &ApiClient) -> Result<()> {
        api.save_contacts(self.raw.trim()).await?;
        self.load(api).await
    }

    fn rebuild_raw(&mut self) {
        self.raw = self
            .contacts
            .iter()
            .map(|c| format!("{};{}", c.email, c.name))
            .collect::<Vec<_>>()
            .join("\n");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_email_without_at() {
        let mut book = ContactBook::new();
        let err = book.add("not-an-email", "Ana").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail("not-an-email".to_owned()));
        assert!(book.is_empty());
        assert_eq!(book.raw_text(), "");
    }

    #[test]
    fn add_trims_and_regenerates_raw() {
        let mut book = ContactBook::new();
        book.add(" a@b.com ", " Ana ").unwrap();
        book.add("c@d.com", "").unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.raw_text(), "a@b.com;Ana\nc@d.com;");
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut book = ContactBook::new();
        book.add("a@b.com", "Ana").unwrap();
        assert!(book.remove(1).is_none());
        assert_eq!(book.len(), 1);
        assert_eq!(book.raw_text(), "a@b.com;Ana");
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut book = ContactBook::new();
        book.add("a@b.com", "A").unwrap();
        book.add("c@d.com", "C").unwrap();
        book.add("e@f.com", "E").unwrap();

        let removed = book.remove(1).unwrap();
        assert_eq!(removed.email, "c@d.com");
        assert_eq!(book.len(), 2);
        assert_eq!(book.contacts()[0].email, "a@b.com");
        assert_eq!(book.contacts()[1].email, "e@f.com");
        assert_eq!(book.raw_text(), "a@b.com;A\ne@f.com;E");
    }

    #[test]
    fn set_raw_replaces_mirror_only() {
        let mut book = ContactBook::new();
        book.add("a@b.com", "Ana").unwrap();
        book.set_raw("x@y.com;Xavier\nz@w.com;");
        assert_eq!(book.raw_text(), "x@y.com;Xavier\nz@w.com;");
        // Cache untouched until the post-save reload.
        assert_eq!(book.len(), 1);
    }

    mod properties {
        use proptest::prelude::*;

        use crate::contacts::ContactBook;

        proptest! {
            #[test]
            fn raw_text_is_joined_email_name_lines(
                entries in prop::collection::vec(
                    ("[a-z]{1,8}@[a-z]{1,8}\\.com", "[A-Za-z ]{0,12}"),
                    0..16,
                ),
            ) {
                let mut book = ContactBook::new();
                for (email, name) in &entries {
                    book.add(email, name).unwrap();
                }

                let expected = book
                    .contacts()
                    .iter()
                    .map(|c| format!("{};{}", c.email, c.name))
                    .collect::<Vec<_>>()
                    .join("\n");
                prop_assert_eq!(book.raw_text(), expected);
                prop_assert_eq!(book.len(), entries.len());
            }
        }
    }
}
