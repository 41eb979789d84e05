use serde::{Deserialize, Serialize};

/// Named fields of the transfer form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

/// The user-editable transfer form.
///
/// All fields are raw strings; the recipient and amount are only parsed
/// at submission time. The form is never implicitly reset, so values
/// persist across submissions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferForm {
    pub address_to: String,
    pub amount: String,
    pub keyword: String,
    pub message: String,
}

impl TransferForm {
    /// Overwrite one named field, leaving the others untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::AddressTo => self.address_to = value,
            FormField::Amount => self.amount = value,
            FormField::Keyword => self.keyword = value,
            FormField::Message => self.message = value,
        }
    }
}
