use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::error::RecordError;
use crate::types::User;

/// A DynamoDB item as returned by get/query/scan
pub type Item = HashMap<String, AttributeValue>;

pub const USER_ID: &str = "userID";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const ADDRESS: &str = "address";
pub const MOBILE_NUMBER: &str = "mobileNumber";
pub const EMAIL_ADDRESS: &str = "emailAddress";

/// Secondary indexes on the contact table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryIndex {
    FirstName,
    LastName,
}

impl SecondaryIndex {
    pub fn index_name(&self) -> &'static str {
        match self {
            SecondaryIndex::FirstName => "firstNameIndex",
            SecondaryIndex::LastName => "lastNameIndex",
        }
    }

    /// Attribute the index is keyed on
    pub fn attribute(&self) -> &'static str {
        match self {
            SecondaryIndex::FirstName => FIRST_NAME,
            SecondaryIndex::LastName => LAST_NAME,
        }
    }
}

/// Primary key map for a user
pub fn key_for(user_id: &str) -> Item {
    HashMap::from([(USER_ID.to_string(), AttributeValue::S(user_id.to_string()))])
}

pub fn user_to_item(user: &User) -> Item {
    [
        (USER_ID, &user.user_id),
        (FIRST_NAME, &user.first_name),
        (LAST_NAME, &user.last_name),
        (ADDRESS, &user.address),
        (MOBILE_NUMBER, &user.mobile_number),
        (EMAIL_ADDRESS, &user.email_address),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), AttributeValue::S(value.clone())))
    .collect()
}

/// Decode a stored item. Absent attributes become empty strings, wrongly typed ones are an error.
pub fn item_to_user(item: &Item) -> Result<User, RecordError> {
    Ok(User {
        user_id: string_attr(item, USER_ID)?,
        first_name: string_attr(item, FIRST_NAME)?,
        last_name: string_attr(item, LAST_NAME)?,
        address: string_attr(item, ADDRESS)?,
        mobile_number: string_attr(item, MOBILE_NUMBER)?,
        email_address: string_attr(item, EMAIL_ADDRESS)?,
    })
}

pub fn items_to_users(items: &[Item]) -> Result<Vec<User>, RecordError> {
    items.iter().map(item_to_user).collect()
}

fn string_attr(item: &Item, name: &str) -> Result<String, RecordError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(String::new()),
        Some(value) => value
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| RecordError::NotAString(name.to_string())),
    }
}
