//! SQL snapshot fixture.

pub const ANG_ID: i64 = 1841;
pub const VEGFA_ID: i64 = 7422;
/// Known target with no disease associations.
pub const ORPHAN_TARGET_ID: i64 = 999;

pub const ALS_ID: i64 = 10;
pub const COLORECTAL_ID: i64 = 20;
pub const BREAST_ID: i64 = 30;
pub const RHEUMATOID_ID: i64 = 40;
pub const PARKINSON_ID: i64 = 50;
/// Disease with no publication row and no trial row.
pub const RARE_DISEASE_ID: i64 = 60;

/// Schema plus rows. Load into an empty SQLite database.
pub const SNAPSHOT_SQL: &str = r#"
CREATE TABLE targets (
    target_id INTEGER PRIMARY KEY,
    targ_abbr TEXT NOT NULL,
    targ_name TEXT NOT NULL
);
CREATE TABLE malacard (
    disease_id INTEGER PRIMARY KEY,
    disease    TEXT NOT NULL
);
CREATE TABLE target_disease (
    target_id  INTEGER NOT NULL,
    disease_id INTEGER NOT NULL,
    f0  REAL,
    f1  REAL,
    f2  REAL,
    pmi REAL
);
CREATE TABLE pubmed_disease_frequencies (
    disease_id INTEGER PRIMARY KEY,
    year_2009 INTEGER, year_2010 INTEGER, year_2011 INTEGER, year_2012 INTEGER,
    year_2013 INTEGER, year_2014 INTEGER, year_2015 INTEGER, year_2016 INTEGER,
    year_2017 INTEGER, year_2018 INTEGER, year_2019 INTEGER, year_2020 INTEGER
);
CREATE TABLE ct_diseases (
    disease        TEXT NOT NULL,
    ct_trial_years TEXT NOT NULL
);
CREATE TABLE ct_forecast (
    disease_id     INTEGER PRIMARY KEY,
    forecast_year1 REAL,
    forecast_year2 REAL
);
CREATE TABLE pubmed (
    pmid INTEGER PRIMARY KEY,
    year INTEGER NOT NULL
);
CREATE TABLE target_pubmed (
    pmid      INTEGER NOT NULL,
    target_id INTEGER NOT NULL
);
CREATE TABLE disease_pubmed (
    pmid       INTEGER NOT NULL,
    disease_id INTEGER NOT NULL
);
CREATE TABLE drug_target_indication (
    target_id   INTEGER NOT NULL,
    drug_name   TEXT NOT NULL,
    drug_status TEXT,
    indication  TEXT
);

INSERT INTO targets VALUES
    (1841, 'ANG',   'Angiogenin'),
    (7422, 'VEGFA', 'Vascular endothelial growth factor A'),
    (1956, 'EGFR',  'Epidermal growth factor receptor'),
    (2064, 'ERBB2', 'Receptor tyrosine-protein kinase erbB-2'),
    (3569, 'IL6',   'Interleukin-6'),
    (7124, 'TNF',   'Tumor necrosis factor'),
    (999,  'ORPH1', 'Orphan receptor 1');

INSERT INTO malacard VALUES
    (10, 'Amyotrophic Lateral Sclerosis'),
    (20, 'Colorectal Cancer'),
    (30, 'Breast Cancer'),
    (40, 'Rheumatoid Arthritis'),
    (50, 'Parkinson Disease'),
    (60, 'Rare Disease X');

-- store order matters: 20 and 50 tie on pmi
INSERT INTO target_disease VALUES
    (1841, 20, 0.10330006, 0.16666667, 0.25,       2.12345678),
    (1841, 10, 0.30990018, 0.5,        0.6,        6.81234567),
    (1841, 30, 0.20660012, 0.33333333, 0.66666667, 'NaN'),
    (1841, 50, 0.05,       0.01,       0.02,       2.12345678),
    (1841, 40, 0.01,       0.001,      NULL,       0.5),
    (7422, 20, 0.10330006, 0.5,        0.25,       4.5);

INSERT INTO pubmed_disease_frequencies VALUES
    (10, 1, 2, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0),
    (20, 0, 0, 0, 0, 2, 0, 1, 0, 0, 1, 0, NULL),
    (30, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1),
    (40, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0);

INSERT INTO ct_diseases VALUES
    ('Amyotrophic Lateral Sclerosis', '[2010, 2012, 2012, 2019]'),
    ('Breast Cancer',                 '[''2015'', ''2015'', ''2016'']'),
    ('Rheumatoid Arthritis',          '[]'),
    ('Colorectal Cancer',             '[1998, 2005]');

INSERT INTO ct_forecast VALUES
    (10, 3.2, 4.1),
    (30, 12.0, 13.5);

INSERT INTO pubmed VALUES
    (1, 2009), (2, 2010), (3, 2010), (4, 2015), (5, 2019), (6, 2020),
    (20, 2012), (21, 2012), (22, 2013), (23, 2013), (24, 2018), (25, 2011);

INSERT INTO target_pubmed VALUES
    (1, 1841), (2, 1841), (3, 1841), (4, 1841), (5, 1841), (6, 1841),
    (20, 7422), (22, 7422);

INSERT INTO disease_pubmed VALUES
    (1, 10), (2, 10), (3, 10), (20, 10), (21, 10),
    (4, 20), (22, 20), (23, 20), (24, 20),
    (5, 30), (6, 30), (25, 30);

INSERT INTO drug_target_indication VALUES
    (1841, 'Neomycin',    'Investigative', 'Amyotrophic lateral sclerosis'),
    (7422, 'Bevacizumab', 'Approved',      'Colorectal cancer'),
    (7422, 'Ranibizumab', 'Approved',      'Macular degeneration');
"#;
