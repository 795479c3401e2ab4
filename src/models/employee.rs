use serde::Deserialize;

#[derive(sqlx::FromRow, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Only managers may lead a project
    #[serde(default)]
    pub is_manager: bool,
    pub email: Option<String>,
}
