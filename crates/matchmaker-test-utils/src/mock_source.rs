//! In-memory `DataSource` for unit tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

use matchmaker_common::{
    DataSource, DrugIndication, Forecast, PrecomputedAssociation, Result, Target, YearCounts,
};

use crate::fixtures::*;

/// Mock source with hardcoded data.
#[derive(Debug, Default, Clone)]
pub struct MockDataSource {
    targets: Vec<Target>,
    diseases: Vec<(i64, String)>,
    precomputed: Vec<(i64, PrecomputedAssociation)>,
    target_mentions: HashMap<i64, u64>,
    joint: HashMap<i64, BTreeMap<i64, u64>>,
    disease_mentions: HashMap<i64, u64>,
    publication_rows: HashMap<i64, YearCounts>,
    publication_records: HashMap<i64, Vec<i32>>,
    trial_years: Vec<(String, String)>,
    forecasts: HashMap<i64, Forecast>,
    drugs: Vec<(i64, DrugIndication)>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, id: i64, abbreviation: &str, name: &str) -> Self {
        self.targets.push(Target {
            id,
            abbreviation: abbreviation.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_disease(mut self, id: i64, name: &str) -> Self {
        self.diseases.push((id, name.to_string()));
        self
    }

    /// Add a materialised score row; the disease name is joined at query time.
    pub fn with_scores(mut self, target_id: i64, disease_id: i64, scores: [Option<f64>; 4]) -> Self {
        let [f0, f1, f2, pmi] = scores;
        self.precomputed.push((
            target_id,
            PrecomputedAssociation { disease_id, disease_name: None, f0, f1, f2, pmi },
        ));
        self
    }

    pub fn with_target_mentions(mut self, target_id: i64, count: u64) -> Self {
        self.target_mentions.insert(target_id, count);
        self
    }

    pub fn with_joint_mentions(mut self, target_id: i64, disease_id: i64, count: u64) -> Self {
        self.joint.entry(target_id).or_default().insert(disease_id, count);
        self
    }

    pub fn with_disease_mentions(mut self, disease_id: i64, count: u64) -> Self {
        self.disease_mentions.insert(disease_id, count);
        self
    }

    pub fn with_publication_row(mut self, disease_id: i64, row: &[(i32, u64)]) -> Self {
        self.publication_rows.insert(disease_id, row.iter().copied().collect());
        self
    }

    pub fn with_publication_records(mut self, disease_id: i64, years: &[i32]) -> Self {
        self.publication_records.insert(disease_id, years.to_vec());
        self
    }

    pub fn with_trial_years(mut self, disease_name: &str, serialized: &str) -> Self {
        self.trial_years.push((disease_name.to_string(), serialized.to_string()));
        self
    }

    pub fn with_forecast(mut self, disease_id: i64, next: f64, following: f64) -> Self {
        self.forecasts.insert(disease_id, Forecast { next, following });
        self
    }

    pub fn with_drug(mut self, target_id: i64, drug_name: &str, status: &str, indication: &str) -> Self {
        self.drugs.push((
            target_id,
            DrugIndication {
                drug_name: drug_name.to_string(),
                status: Some(status.to_string()),
                indication: Some(indication.to_string()),
            },
        ));
        self
    }

    /// The same snapshot as [`crate::SNAPSHOT_SQL`].
    pub fn snapshot() -> Self {
        Self::new()
            .with_target(ANG_ID, "ANG", "Angiogenin")
            .with_target(VEGFA_ID, "VEGFA", "Vascular endothelial growth factor A")
            .with_target(1956, "EGFR", "Epidermal growth factor receptor")
            .with_target(2064, "ERBB2", "Receptor tyrosine-protein kinase erbB-2")
            .with_target(3569, "IL6", "Interleukin-6")
            .with_target(7124, "TNF", "Tumor necrosis factor")
            .with_target(ORPHAN_TARGET_ID, "ORPH1", "Orphan receptor 1")
            .with_disease(ALS_ID, "Amyotrophic Lateral Sclerosis")
            .with_disease(COLORECTAL_ID, "Colorectal Cancer")
            .with_disease(BREAST_ID, "Breast Cancer")
            .with_disease(RHEUMATOID_ID, "Rheumatoid Arthritis")
            .with_disease(PARKINSON_ID, "Parkinson Disease")
            .with_disease(RARE_DISEASE_ID, "Rare Disease X")
            .with_scores(ANG_ID, COLORECTAL_ID, [Some(0.10330006), Some(0.16666667), Some(0.25), Some(2.12345678)])
            .with_scores(ANG_ID, ALS_ID, [Some(0.30990018), Some(0.5), Some(0.6), Some(6.81234567)])
            .with_scores(ANG_ID, BREAST_ID, [Some(0.20660012), Some(0.33333333), Some(0.66666667), None])
            .with_scores(ANG_ID, PARKINSON_ID, [Some(0.05), Some(0.01), Some(0.02), Some(2.12345678)])
            .with_scores(ANG_ID, RHEUMATOID_ID, [Some(0.01), Some(0.001), None, Some(0.5)])
            .with_scores(VEGFA_ID, COLORECTAL_ID, [Some(0.10330006), Some(0.5), Some(0.25), Some(4.5)])
            .with_target_mentions(ANG_ID, 6)
            .with_target_mentions(VEGFA_ID, 2)
            .with_joint_mentions(ANG_ID, ALS_ID, 3)
            .with_joint_mentions(ANG_ID, COLORECTAL_ID, 1)
            .with_joint_mentions(ANG_ID, BREAST_ID, 2)
            .with_joint_mentions(VEGFA_ID, ALS_ID, 1)
            .with_joint_mentions(VEGFA_ID, COLORECTAL_ID, 1)
            .with_disease_mentions(ALS_ID, 5)
            .with_disease_mentions(COLORECTAL_ID, 4)
            .with_disease_mentions(BREAST_ID, 3)
            .with_publication_row(ALS_ID, &[(2009, 1), (2010, 2), (2012, 2)])
            .with_publication_row(COLORECTAL_ID, &[(2013, 2), (2015, 1), (2018, 1)])
            .with_publication_row(BREAST_ID, &[(2011, 1), (2019, 1), (2020, 1)])
            .with_publication_row(RHEUMATOID_ID, &[])
            .with_publication_records(ALS_ID, &[2009, 2010, 2010, 2012, 2012])
            .with_publication_records(COLORECTAL_ID, &[2015, 2013, 2013, 2018])
            .with_publication_records(BREAST_ID, &[2019, 2020, 2011])
            .with_trial_years("Amyotrophic Lateral Sclerosis", "[2010, 2012, 2012, 2019]")
            .with_trial_years("Breast Cancer", "['2015', '2015', '2016']")
            .with_trial_years("Rheumatoid Arthritis", "[]")
            .with_trial_years("Colorectal Cancer", "[1998, 2005]")
            .with_forecast(ALS_ID, 3.2, 4.1)
            .with_forecast(BREAST_ID, 12.0, 13.5)
            .with_drug(ANG_ID, "Neomycin", "Investigative", "Amyotrophic lateral sclerosis")
            .with_drug(VEGFA_ID, "Bevacizumab", "Approved", "Colorectal cancer")
            .with_drug(VEGFA_ID, "Ranibizumab", "Approved", "Macular degeneration")
    }

    fn name_of(&self, disease_id: i64) -> Option<String> {
        self.diseases
            .iter()
            .find(|(id, _)| *id == disease_id)
            .map(|(_, name)| name.clone())
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn find_target(&self, name_or_abbreviation: &str) -> Result<Option<Target>> {
        Ok(self
            .targets
            .iter()
            .find(|t| t.name == name_or_abbreviation || t.abbreviation == name_or_abbreviation)
            .cloned())
    }

    async fn target_by_id(&self, target_id: i64) -> Result<Option<Target>> {
        Ok(self.targets.iter().find(|t| t.id == target_id).cloned())
    }

    async fn target_abbreviations(&self) -> Result<Vec<String>> {
        Ok(self.targets.iter().map(|t| t.abbreviation.clone()).collect())
    }

    async fn disease_name(&self, disease_id: i64) -> Result<Option<String>> {
        Ok(self.name_of(disease_id))
    }

    async fn disease_id(&self, disease_name: &str) -> Result<Option<i64>> {
        Ok(self
            .diseases
            .iter()
            .find(|(_, name)| name == disease_name)
            .map(|(id, _)| *id))
    }

    async fn precomputed_associations(&self, target_id: i64) -> Result<Vec<PrecomputedAssociation>> {
        Ok(self
            .precomputed
            .iter()
            .filter(|(t, _)| *t == target_id)
            .map(|(_, row)| PrecomputedAssociation {
                disease_name: self.name_of(row.disease_id),
                ..row.clone()
            })
            .collect())
    }

    async fn target_document_count(&self, target_id: i64) -> Result<u64> {
        Ok(self.target_mentions.get(&target_id).copied().unwrap_or(0))
    }

    async fn joint_document_counts(&self, target_id: i64) -> Result<Vec<(i64, u64)>> {
        Ok(self
            .joint
            .get(&target_id)
            .map(|m| m.iter().map(|(d, n)| (*d, *n)).collect())
            .unwrap_or_default())
    }

    async fn disease_document_count(&self, disease_id: i64) -> Result<u64> {
        Ok(self.disease_mentions.get(&disease_id).copied().unwrap_or(0))
    }

    async fn publication_year_row(&self, disease_id: i64) -> Result<Option<YearCounts>> {
        Ok(self.publication_rows.get(&disease_id).cloned())
    }

    async fn publication_record_years(&self, disease_id: i64) -> Result<Vec<i32>> {
        Ok(self.publication_records.get(&disease_id).cloned().unwrap_or_default())
    }

    async fn trial_years(&self, disease_name: &str) -> Result<Option<String>> {
        Ok(self
            .trial_years
            .iter()
            .find(|(name, _)| name == disease_name)
            .map(|(_, years)| years.clone()))
    }

    async fn trial_forecast(&self, disease_id: i64) -> Result<Option<Forecast>> {
        Ok(self.forecasts.get(&disease_id).copied())
    }

    async fn drugs_for_target(&self, target_id: i64) -> Result<Vec<DrugIndication>> {
        Ok(self
            .drugs
            .iter()
            .filter(|(t, _)| *t == target_id)
            .map(|(_, d)| d.clone())
            .collect())
    }
}
