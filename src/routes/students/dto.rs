use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct EnrollmentCsvRow {
    pub email: String,
    pub name: String,
}

impl EnrollmentCsvRow {
    pub fn validate(&self) -> Result<(), String> {
        if self.email.is_empty() || !self.email.contains('@') {
            return Err("Valid email is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        Ok(())
    }

    /// First token is the first name, the rest the last name
    pub fn split_name(&self) -> (String, String) {
        let trimmed = self.name.trim();
        match trimmed.split_once(' ') {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (trimmed.to_string(), String::new()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkEnrollResponse {
    pub file_name: String,
    pub total_records: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<BulkEnrollError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkEnrollError {
    pub row: usize,
    pub email: String,
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentProgressResponse {
    pub total: u64,
    pub current: u64,
    pub percent: u64,
    pub success: u64,
    pub failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_parse_with_email_name_header() {
        let data = "email,name\nriya@example.com,Riya Patel\nsam@example.com,Sam\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<EnrollmentCsvRow> = reader
            .deserialize()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].email, "riya@example.com");
        assert_eq!(rows[0].split_name(), ("Riya".to_string(), "Patel".to_string()));
        assert_eq!(rows[1].split_name(), ("Sam".to_string(), String::new()));
    }

    #[test]
    fn rows_without_a_valid_email_are_rejected() {
        let row = EnrollmentCsvRow {
            email: "not-an-email".to_string(),
            name: "Riya Patel".to_string(),
        };
        assert!(row.validate().is_err());

        let row = EnrollmentCsvRow {
            email: "riya@example.com".to_string(),
            name: "  ".to_string(),
        };
        assert!(row.validate().is_err());
    }
}
