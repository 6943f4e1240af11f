use serde::{Deserialize, Serialize};

use crate::domain::todo::WriteResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody { pub msg: String }

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub msg: &'static str,
    pub result: WriteResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery { pub sort: Option<String> }
