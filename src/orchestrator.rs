use anyhow::{Context, Result};
use aws_sdk_sagemaker::types::{
    AppSpecification, ProcessingClusterConfig, ProcessingInstanceType, ProcessingOutput,
    ProcessingOutputConfig, ProcessingResources, ProcessingS3Output, ProcessingS3UploadMode,
};
use serde::Serialize;
use tracing::info;

const OUTPUT_NAME: &str = "filmes-output";
const OUTPUT_LOCAL_PATH: &str = "/opt/ml/processing/output";

/// Response of the trigger entry point.
#[derive(Debug, Serialize)]
pub struct TriggerStatus {
    pub status: &'static str,
    pub job_name: String,
}

/// Submit a SageMaker processing job that runs the scraper remotely.
/// Pure request construction: no polling, no retries. The job uploads
/// its output directory to S3 when it finishes.
pub async fn trigger_job() -> Result<TriggerStatus> {
    let role = std::env::var("SAGEMAKER_ROLE").context("SAGEMAKER_ROLE must be set")?;
    let image = std::env::var("IMAGE_URI").context("IMAGE_URI must be set")?;
    let bucket = std::env::var("BUCKET_NAME").context("BUCKET_NAME must be set")?;

    let job_name = job_name(chrono::Utc::now().timestamp());

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_sagemaker::Client::new(&sdk_config);

    client
        .create_processing_job()
        .processing_job_name(&job_name)
        .role_arn(role)
        .processing_resources(processing_resources())
        .app_specification(app_specification(&image))
        .processing_output_config(output_config(&bucket))
        .send()
        .await
        .with_context(|| format!("submitting processing job {job_name}"))?;

    info!("processing job {} submitted", job_name);
    Ok(TriggerStatus {
        status: "STARTED",
        job_name,
    })
}

fn job_name(timestamp: i64) -> String {
    format!("filme-job-{timestamp}")
}

/// Fixed sizing: a single ml.m5.large with a 30 GB volume.
fn processing_resources() -> ProcessingResources {
    ProcessingResources::builder()
        .cluster_config(
            ProcessingClusterConfig::builder()
                .instance_count(1)
                .instance_type(ProcessingInstanceType::MlM5Large)
                .volume_size_in_gb(30)
                .build(),
        )
        .build()
}

fn app_specification(image: &str) -> AppSpecification {
    AppSpecification::builder()
        .image_uri(image)
        .container_entrypoint("/usr/local/bin/filme-scraper")
        .container_entrypoint("run")
        .build()
}

/// One output channel, uploaded to S3 when the job ends.
fn output_config(bucket: &str) -> ProcessingOutputConfig {
    ProcessingOutputConfig::builder()
        .outputs(
            ProcessingOutput::builder()
                .output_name(OUTPUT_NAME)
                .s3_output(
                    ProcessingS3Output::builder()
                        .s3_uri(format!("s3://{bucket}/output/"))
                        .local_path(OUTPUT_LOCAL_PATH)
                        .s3_upload_mode(ProcessingS3UploadMode::EndOfJob)
                        .build(),
                )
                .build(),
        )
        .build()
}
