use rocket::data::ByteUnit;

/// Limit of urlencoded form bodies, a note may be as large as a DynamoDB
/// item.
pub const NOTE_FORM_LIMIT: ByteUnit = ByteUnit::Kibibyte(400);
