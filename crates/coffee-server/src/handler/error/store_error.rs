//! Drink store error handlers.

use crate::handler::{Error, ErrorKind};
use crate::store::StoreError;

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateTitle(title) => ErrorKind::Unprocessable
                .with_message("a drink with this title already exists")
                .with_context(format!("duplicate title: {title}")),
            StoreError::NotFound(id) => ErrorKind::NotFound
                .with_resource("drinks")
                .with_context(format!("drink {id} does not exist")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_title_is_unprocessable() {
        let error = Error::from(StoreError::DuplicateTitle("latte".to_owned()));
        assert_eq!(error.kind(), ErrorKind::Unprocessable);
        assert_eq!(error.context(), Some("duplicate title: latte"));
    }

    #[test]
    fn missing_drink_is_not_found() {
        let error = Error::from(StoreError::NotFound(3));
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.resource(), Some("drinks"));
    }
}
