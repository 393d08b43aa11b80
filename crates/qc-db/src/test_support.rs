//! Shared test utilities for qc-db unit tests.

pub(crate) mod helpers {
    use qc_core::entities::{Code, Source};
    use qc_core::ids::CodeId;

    use crate::QcDb;
    use crate::repos::source::NewSource;
    use crate::service::QcService;

    /// Create an in-memory `QcService`.
    pub async fn test_service() -> QcService {
        let db = QcDb::open_local(":memory:").await.unwrap();
        QcService::from_db(db)
    }

    /// Create a code and optionally place it under `parent`.
    pub async fn seed_code(svc: &QcService, name: &str, parent: Option<CodeId>) -> Code {
        let code = svc.create_code(name).await.unwrap();
        match parent {
            Some(parent_id) => svc.set_code_parent(code.id, Some(parent_id)).await.unwrap(),
            None => code,
        }
    }

    /// Create a source with only the required fields set.
    pub async fn seed_source(svc: &QcService, number: i64, name: &str) -> Source {
        svc.create_source(&NewSource::new(number, name)).await.unwrap()
    }
}
