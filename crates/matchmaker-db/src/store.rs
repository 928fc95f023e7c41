//! `DataSource` implementation over the SQLite snapshot.

use async_trait::async_trait;
use std::sync::Arc;

use matchmaker_common::{
    DataSource, DrugIndication, Forecast, PrecomputedAssociation, Result, Target, YearCounts,
};

use crate::{
    AssociationRepository, Database, DiseaseRepository, DrugRepository, TargetRepository,
    TrialRepository,
};

/// All repositories over one shared pool.
#[derive(Clone)]
pub struct SnapshotStore {
    db: Arc<Database>,
    targets: TargetRepository,
    diseases: DiseaseRepository,
    associations: AssociationRepository,
    trials: TrialRepository,
    drugs: DrugRepository,
}

impl SnapshotStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            targets: TargetRepository::new(db.clone()),
            diseases: DiseaseRepository::new(db.clone()),
            associations: AssociationRepository::new(db.clone()),
            trials: TrialRepository::new(db.clone()),
            drugs: DrugRepository::new(db.clone()),
            db,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DataSource for SnapshotStore {
    async fn find_target(&self, name_or_abbreviation: &str) -> Result<Option<Target>> {
        Ok(self.targets.find_by_name_or_abbreviation(name_or_abbreviation).await?)
    }

    async fn target_by_id(&self, target_id: i64) -> Result<Option<Target>> {
        Ok(self.targets.find_by_id(target_id).await?)
    }

    async fn target_abbreviations(&self) -> Result<Vec<String>> {
        Ok(self.targets.abbreviations().await?)
    }

    async fn disease_name(&self, disease_id: i64) -> Result<Option<String>> {
        Ok(self.diseases.name(disease_id).await?)
    }

    async fn disease_id(&self, disease_name: &str) -> Result<Option<i64>> {
        Ok(self.diseases.id_by_name(disease_name).await?)
    }

    async fn precomputed_associations(&self, target_id: i64) -> Result<Vec<PrecomputedAssociation>> {
        Ok(self.associations.precomputed_for_target(target_id).await?)
    }

    async fn target_document_count(&self, target_id: i64) -> Result<u64> {
        Ok(self.targets.document_count(target_id).await?)
    }

    async fn joint_document_counts(&self, target_id: i64) -> Result<Vec<(i64, u64)>> {
        Ok(self.associations.joint_counts(target_id).await?)
    }

    async fn disease_document_count(&self, disease_id: i64) -> Result<u64> {
        Ok(self.diseases.document_count(disease_id).await?)
    }

    async fn publication_year_row(&self, disease_id: i64) -> Result<Option<YearCounts>> {
        Ok(self.diseases.publication_year_row(disease_id).await?)
    }

    async fn publication_record_years(&self, disease_id: i64) -> Result<Vec<i32>> {
        Ok(self.diseases.publication_record_years(disease_id).await?)
    }

    async fn trial_years(&self, disease_name: &str) -> Result<Option<String>> {
        Ok(self.trials.trial_years(disease_name).await?)
    }

    async fn trial_forecast(&self, disease_id: i64) -> Result<Option<Forecast>> {
        Ok(self.trials.forecast(disease_id).await?)
    }

    async fn drugs_for_target(&self, target_id: i64) -> Result<Vec<DrugIndication>> {
        Ok(self.drugs.for_target(target_id).await?)
    }
}
