//! Escola use cases: uniqueness checks, default identifiers, partial-update
//! merge and icon encoding on top of an [`EscolaRepository`].

use std::sync::Arc;

use crate::error::CoreError;
use crate::escola::{decode_icone, Escola, EscolaAttributes, EscolaDto, EscolaGuid};
use crate::field::EscolaField;
use crate::input::{EscolaInput, EscolaPatch};
use crate::repository::EscolaRepository;

const ENTITY: &str = "Escola";

/// Application service for Escola records. Cheap to clone.
#[derive(Clone)]
pub struct EscolaService {
    repo: Arc<dyn EscolaRepository>,
}

impl EscolaService {
    pub fn new(repo: Arc<dyn EscolaRepository>) -> Self {
        Self { repo }
    }

    /// Create an Escola.
    ///
    /// A missing or empty `EscolaGUID` gets a fresh v4 UUID. Fails with
    /// [`CoreError::Conflict`] if another Escola already has exactly this name.
    pub async fn create_escola(&self, input: EscolaInput) -> Result<EscolaDto, CoreError> {
        let escola = Escola::from_input(input)?;

        if let Some(nome) = escola.nome() {
            let existing = self.repo.find_by_field(EscolaField::Nome, nome).await?;
            if !existing.is_empty() {
                return Err(duplicate_nome(nome));
            }
        }

        self.repo.create(&escola).await?;
        tracing::info!(escola_guid = %escola.guid(), "Escola created");
        Ok(EscolaDto::from(&escola))
    }

    /// List every Escola, or those whose name contains `nome`.
    pub async fn find_all(&self, nome: Option<&str>) -> Result<Vec<EscolaDto>, CoreError> {
        let filter = nome.filter(|n| !n.is_empty());
        let escolas = self.repo.find_all(filter).await?;
        tracing::debug!(count = escolas.len(), filter = ?filter, "Listed escolas");
        Ok(escolas.iter().map(EscolaDto::from).collect())
    }

    pub async fn find_by_id(&self, guid: &EscolaGuid) -> Result<EscolaDto, CoreError> {
        let escola = self
            .repo
            .find_by_id(guid)
            .await?
            .ok_or_else(|| not_found(guid))?;
        Ok(EscolaDto::from(&escola))
    }

    /// Merge `patch` into the stored Escola and persist the result.
    ///
    /// A key present in the patch overrides the stored value, even when it is
    /// `null`; an absent key keeps the stored value. An icon of `null` or `""`
    /// clears the icon.
    pub async fn update_escola(
        &self,
        guid: &EscolaGuid,
        patch: EscolaPatch,
    ) -> Result<EscolaDto, CoreError> {
        let existing = self
            .repo
            .find_by_id(guid)
            .await?
            .ok_or_else(|| not_found(guid))?;
        let stored = existing.to_attributes();

        let icone = match patch.icone {
            None => stored.icone,
            Some(value) => decode_icone(value.as_deref())?,
        };

        let escola = Escola::build(
            guid.clone(),
            EscolaAttributes {
                nome: patch.nome.unwrap_or(stored.nome),
                cor_pri_es: patch.cor_pri_es.unwrap_or(stored.cor_pri_es),
                cor_pri_cl: patch.cor_pri_cl.unwrap_or(stored.cor_pri_cl),
                cor_sec_es: patch.cor_sec_es.unwrap_or(stored.cor_sec_es),
                cor_sec_cl: patch.cor_sec_cl.unwrap_or(stored.cor_sec_cl),
                icone,
            },
        )?;

        if let Some(nome) = escola.nome().filter(|n| Some(*n) != existing.nome()) {
            let taken = self
                .repo
                .find_by_field(EscolaField::Nome, nome)
                .await?
                .iter()
                .any(|other| other.guid() != guid);
            if taken {
                return Err(duplicate_nome(nome));
            }
        }

        if self.repo.update(&escola).await? {
            tracing::info!(escola_guid = %guid, "Escola updated");
        } else {
            tracing::warn!(escola_guid = %guid, "Escola removed before its update was written");
        }
        Ok(EscolaDto::from(&escola))
    }

    /// Delete an Escola. Returns `false` (not an error) if it did not exist.
    pub async fn delete_escola(&self, guid: &EscolaGuid) -> Result<bool, CoreError> {
        let deleted = self.repo.delete(guid).await?;
        tracing::info!(escola_guid = %guid, deleted, "Escola delete requested");
        Ok(deleted)
    }
}

fn not_found(guid: &EscolaGuid) -> CoreError {
    CoreError::NotFound {
        entity: ENTITY,
        id: guid.to_string(),
    }
}

fn duplicate_nome(nome: &str) -> CoreError {
    CoreError::Conflict(format!("Escola '{nome}' is already registered"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::testing::MemoryRepo;

    fn service() -> EscolaService {
        EscolaService::new(Arc::new(MemoryRepo::new()))
    }

    fn input(value: serde_json::Value) -> EscolaInput {
        serde_json::from_value(value).unwrap()
    }

    fn patch(value: serde_json::Value) -> EscolaPatch {
        serde_json::from_value(value).unwrap()
    }

    fn guid(dto: &EscolaDto) -> EscolaGuid {
        EscolaGuid::parse(&dto.guid).unwrap()
    }

    const ZERO_GUID: &str = "00000000-0000-0000-0000-000000000000";

    // -- Create --

    #[tokio::test]
    async fn create_generates_identifier_and_null_icon() {
        let svc = service();
        let dto = svc
            .create_escola(input(json!({"EscolaNome": "Colégio Azul", "EscolaCorPriEs": "1A2B3C"})))
            .await
            .unwrap();

        assert_eq!(dto.guid.chars().count(), 36);
        assert_eq!(dto.nome.as_deref(), Some("Colégio Azul"));
        assert_eq!(dto.cor_pri_es.as_deref(), Some("1A2B3C"));
        assert_eq!(dto.icone, None);
    }

    #[tokio::test]
    async fn create_keeps_supplied_identifier() {
        let svc = service();
        let dto = svc
            .create_escola(input(json!({"EscolaGUID": ZERO_GUID, "EscolaNome": "Escola Zero"})))
            .await
            .unwrap();
        assert_eq!(dto.guid, ZERO_GUID);
    }

    #[tokio::test]
    async fn create_with_empty_identifier_generates_one() {
        let svc = service();
        let dto = svc
            .create_escola(input(json!({"EscolaGUID": "", "EscolaNome": "Escola Nova"})))
            .await
            .unwrap();
        assert_eq!(dto.guid.len(), 36);
    }

    #[tokio::test]
    async fn create_rejects_malformed_identifier() {
        let svc = service();
        let result = svc
            .create_escola(input(json!({"EscolaGUID": "short", "EscolaNome": "Escola Nova"})))
            .await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn create_with_duplicate_name_conflicts() {
        let svc = service();
        svc.create_escola(input(json!({"EscolaNome": "Colégio Azul"})))
            .await
            .unwrap();

        let result = svc
            .create_escola(input(json!({"EscolaNome": "Colégio Azul", "EscolaCorPriEs": "FFFFFF"})))
            .await;
        assert_matches!(result, Err(CoreError::Conflict(msg)) if msg.contains("Colégio Azul"));
    }

    #[tokio::test]
    async fn duplicate_check_uses_trimmed_name() {
        let svc = service();
        svc.create_escola(input(json!({"EscolaNome": "Colégio Azul"})))
            .await
            .unwrap();
        let result = svc
            .create_escola(input(json!({"EscolaNome": "  Colégio Azul  "})))
            .await;
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_decodes_icon() {
        let svc = service();
        let dto = svc
            .create_escola(input(json!({"EscolaNome": "Escola Ícone", "EscolaIcone": "AAEC/w=="})))
            .await
            .unwrap();
        assert_eq!(dto.icone.as_deref(), Some("AAEC/w=="));

        let stored = svc.repo.find_by_id(&guid(&dto)).await.unwrap().unwrap();
        assert_eq!(stored.icone(), Some(&[0u8, 1, 2, 255][..]));
    }

    #[tokio::test]
    async fn create_rejects_invalid_color_before_persisting() {
        let svc = service();
        let result = svc
            .create_escola(input(json!({"EscolaNome": "Escola Cor", "EscolaCorSecEs": "12345"})))
            .await;
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("EscolaCorSecEs"));
        assert!(svc.find_all(None).await.unwrap().is_empty());
    }

    // -- Read --

    #[tokio::test]
    async fn find_all_filters_by_name_substring() {
        let svc = service();
        svc.create_escola(input(json!({"EscolaNome": "Colégio Azul"})))
            .await
            .unwrap();
        svc.create_escola(input(json!({"EscolaNome": "Escola Verde"})))
            .await
            .unwrap();

        let matches = svc.find_all(Some("Azul")).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].nome.as_deref(), Some("Colégio Azul"));

        assert_eq!(svc.find_all(None).await.unwrap().len(), 2);
        assert_eq!(svc.find_all(Some("")).await.unwrap().len(), 2);
        assert_eq!(svc.find_all(Some("azul")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_id_of_unknown_escola_is_not_found() {
        let svc = service();
        let result = svc.find_by_id(&EscolaGuid::parse(ZERO_GUID).unwrap()).await;
        assert_matches!(
            result,
            Err(CoreError::NotFound { entity: "Escola", id }) if id == ZERO_GUID
        );
    }

    // -- Update --

    #[tokio::test]
    async fn update_with_null_name_clears_only_the_name() {
        let svc = service();
        let created = svc
            .create_escola(input(json!({
                "EscolaNome": "Colégio Azul",
                "EscolaCorPriEs": "1A2B3C",
                "EscolaIcone": "aGk=",
            })))
            .await
            .unwrap();

        let updated = svc
            .update_escola(&guid(&created), patch(json!({"EscolaNome": null})))
            .await
            .unwrap();

        assert_eq!(updated.nome, None);
        assert_eq!(updated.cor_pri_es.as_deref(), Some("1A2B3C"));
        assert_eq!(updated.icone.as_deref(), Some("aGk="));
    }

    #[tokio::test]
    async fn update_with_empty_patch_keeps_everything() {
        let svc = service();
        let created = svc
            .create_escola(input(json!({
                "EscolaNome": "Escola Verde",
                "EscolaCorPriCl": "00ff00",
                "EscolaCorSecCl": "0000FF",
                "EscolaIcone": "cG5n",
            })))
            .await
            .unwrap();

        let updated = svc
            .update_escola(&guid(&created), EscolaPatch::default())
            .await
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn update_follows_merge_by_key_presence() {
        let svc = service();
        let created = svc
            .create_escola(input(json!({
                "EscolaNome": "Escola Verde",
                "EscolaCorPriEs": "111111",
                "EscolaCorPriCl": "222222",
                "EscolaCorSecEs": "333333",
            })))
            .await
            .unwrap();

        let updated = svc
            .update_escola(
                &guid(&created),
                patch(json!({
                    "EscolaCorPriEs": "AAAAAA",
                    "EscolaCorPriCl": null,
                    "EscolaCorSecCl": "BBBBBB",
                })),
            )
            .await
            .unwrap();

        assert_eq!(updated.nome.as_deref(), Some("Escola Verde"));
        assert_eq!(updated.cor_pri_es.as_deref(), Some("AAAAAA"));
        assert_eq!(updated.cor_pri_cl, None);
        assert_eq!(updated.cor_sec_es.as_deref(), Some("333333"));
        assert_eq!(updated.cor_sec_cl.as_deref(), Some("BBBBBB"));
    }

    #[tokio::test]
    async fn update_icon_null_or_empty_clears_it() {
        let svc = service();
        for cleared in [json!(null), json!("")] {
            let created = svc
                .create_escola(input(json!({"EscolaIcone": "aGk="})))
                .await
                .unwrap();
            let updated = svc
                .update_escola(&guid(&created), patch(json!({"EscolaIcone": cleared})))
                .await
                .unwrap();
            assert_eq!(updated.icone, None);
        }
    }

    #[tokio::test]
    async fn update_icon_replaces_bytes() {
        let svc = service();
        let created = svc
            .create_escola(input(json!({"EscolaIcone": "aGk="})))
            .await
            .unwrap();
        let updated = svc
            .update_escola(&guid(&created), patch(json!({"EscolaIcone": "cG5n"})))
            .await
            .unwrap();
        assert_eq!(updated.icone.as_deref(), Some("cG5n"));
    }

    #[tokio::test]
    async fn update_of_unknown_escola_is_not_found() {
        let svc = service();
        let result = svc
            .update_escola(
                &EscolaGuid::parse(ZERO_GUID).unwrap(),
                patch(json!({"EscolaNome": "Escola Nova"})),
            )
            .await;
        assert_matches!(result, Err(CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_rejects_invalid_value_and_keeps_stored_row() {
        let svc = service();
        let created = svc
            .create_escola(input(json!({"EscolaNome": "Escola Verde"})))
            .await
            .unwrap();
        let id = guid(&created);

        let result = svc
            .update_escola(&id, patch(json!({"EscolaNome": "ab"})))
            .await;
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(svc.find_by_id(&id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_to_another_escolas_name_conflicts() {
        let svc = service();
        svc.create_escola(input(json!({"EscolaNome": "Colégio Azul"})))
            .await
            .unwrap();
        let other = svc
            .create_escola(input(json!({"EscolaNome": "Escola Verde"})))
            .await
            .unwrap();

        let result = svc
            .update_escola(&guid(&other), patch(json!({"EscolaNome": "Colégio Azul"})))
            .await;
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeping_own_name_is_not_a_conflict() {
        let svc = service();
        let created = svc
            .create_escola(input(json!({"EscolaNome": "Colégio Azul"})))
            .await
            .unwrap();
        let updated = svc
            .update_escola(
                &guid(&created),
                patch(json!({"EscolaNome": "Colégio Azul", "EscolaCorPriEs": "ABCDEF"})),
            )
            .await
            .unwrap();
        assert_eq!(updated.cor_pri_es.as_deref(), Some("ABCDEF"));
    }

    /// Lets the existence check pass but loses every `UPDATE`, as when the
    /// row is deleted between lookup and write.
    struct VanishingRepo(MemoryRepo);

    #[async_trait::async_trait]
    impl EscolaRepository for VanishingRepo {
        async fn create(&self, escola: &Escola) -> Result<EscolaGuid, CoreError> {
            self.0.create(escola).await
        }

        async fn delete(&self, guid: &EscolaGuid) -> Result<bool, CoreError> {
            self.0.delete(guid).await
        }

        async fn update(&self, _escola: &Escola) -> Result<bool, CoreError> {
            Ok(false)
        }

        async fn find_all(&self, nome: Option<&str>) -> Result<Vec<Escola>, CoreError> {
            self.0.find_all(nome).await
        }

        async fn find_by_field(
            &self,
            field: EscolaField,
            value: &str,
        ) -> Result<Vec<Escola>, CoreError> {
            self.0.find_by_field(field, value).await
        }
    }

    #[tokio::test]
    async fn update_lost_to_concurrent_delete_still_answers_with_merged_record() {
        let svc = EscolaService::new(Arc::new(VanishingRepo(MemoryRepo::new())));
        let created = svc
            .create_escola(input(json!({"EscolaNome": "Escola Verde"})))
            .await
            .unwrap();

        let updated = svc
            .update_escola(&guid(&created), patch(json!({"EscolaCorPriEs": "ABCDEF"})))
            .await
            .unwrap();
        assert_eq!(updated.cor_pri_es.as_deref(), Some("ABCDEF"));
        assert_eq!(svc.find_by_id(&guid(&created)).await.unwrap().cor_pri_es, None);
    }

    // -- Delete --

    #[tokio::test]
    async fn delete_of_unknown_escola_returns_false() {
        let svc = service();
        let deleted = svc
            .delete_escola(&EscolaGuid::parse(ZERO_GUID).unwrap())
            .await
            .unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn delete_removes_the_escola() {
        let svc = service();
        let created = svc
            .create_escola(input(json!({"EscolaNome": "Escola Verde"})))
            .await
            .unwrap();
        let id = guid(&created);

        assert!(svc.delete_escola(&id).await.unwrap());
        assert_matches!(svc.find_by_id(&id).await, Err(CoreError::NotFound { .. }));
        assert!(!svc.delete_escola(&id).await.unwrap());
    }
}
