use serde::Deserialize;

#[derive(sqlx::FromRow, Deserialize, Debug, Clone, PartialEq)]
pub struct Client {
    /// National tax identifier (DNI/CIF)
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}
