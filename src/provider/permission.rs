//! Permission strings in the provider's `action("role")` syntax.

/// Literal document id asking the provider to generate one.
pub const UNIQUE_ID: &str = "unique()";

pub fn user_role(user_id: &str) -> String {
    format!("user:{}", user_id)
}

pub fn read(role: &str) -> String {
    format!("read(\"{}\")", role)
}

pub fn write(role: &str) -> String {
    format!("write(\"{}\")", role)
}

pub fn create(role: &str) -> String {
    format!("create(\"{}\")", role)
}

/// Read/write for the owning user only.
pub fn owner(user_id: &str) -> Vec<String> {
    let role = user_role(user_id);
    vec![read(&role), write(&role)]
}
