use anyhow::Result;
use tabular_etl::utils::validation::Validate;
use tabular_etl::{AnalysisPipeline, EtlEngine, ExtractPipeline, JobConfig, LocalStorage};
use tempfile::TempDir;

/// 從 TOML 檔案載入工作設定並依序執行抽取與分析
#[test]
fn test_job_file_drives_both_pipelines() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("crm_export.csv"),
        "Account,Amount,Region,Stage\nAcme,$1200,North,Won\nGlobex,(300),South,Lost\n",
    )?;
    std::fs::write(
        temp_dir.path().join("finance_template.csv"),
        "Region,Amount\n",
    )?;
    std::fs::write(
        temp_dir.path().join("sales.csv"),
        "month,revenue,cost\nJan,200,100\nFeb,250,100\n",
    )?;

    let job_path = temp_dir.path().join("job.toml");
    std::fs::write(
        &job_path,
        r#"
[job]
name = "month-end"

[extract]
source = "crm_export.csv"
template = "finance_template.csv"
output = "out/finance.csv"

[analyze]
input = "sales.csv"
output = "out/sales_analysis.csv"
summary = "out/summary.json"
"#,
    )?;

    let config = JobConfig::from_file(&job_path)?;
    config.validate()?;

    let storage = LocalStorage::new(temp_dir.path());

    let extract = config.extract.clone().expect("extract section");
    let report = EtlEngine::new(ExtractPipeline::new(storage.clone(), extract)).run()?;
    assert_eq!(report.lines()[1], "Number of rows processed: 2");
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("out/finance.csv"))?,
        "Region,Amount\nNorth,1200\nSouth,300\n"
    );

    let analyze = config.analyze.clone().expect("analyze section");
    let report = EtlEngine::new(AnalysisPipeline::new(storage, analyze)).run()?;
    assert_eq!(report.rows, 2);
    assert_eq!(
        report.lines(),
        vec![
            "Successfully analyzed 2 rows to out/sales_analysis.csv".to_string(),
            "Summary written to out/summary.json".to_string(),
        ]
    );

    let summary = report.summary.expect("summary");
    assert_eq!(summary.total_margin, 250.0);
    assert_eq!(summary.highest_cost_month.as_deref(), Some("Jan"));
    assert_eq!(summary.highest_cost_growth, Some(0.0));
    assert_eq!(summary.best_margin_month.as_deref(), Some("Feb"));
    assert!(temp_dir.path().join("out/summary.json").exists());
    Ok(())
}
