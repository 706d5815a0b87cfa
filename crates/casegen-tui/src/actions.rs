//! Action dispatch: each [`UpdateAction`] spawns one background task
//! that performs the API call and sends exactly one completion message
//! back into the TEA loop (the compound refresh sends two, one per
//! fetch, in the original's await order).

use tokio::sync::mpsc;
use tracing::warn;

use casegen_api::{
    prompt_override, ApiClient, GenerateRequest, JiraRequest, RegenerateRequest,
    RegenerateTestcaseRequest,
};
use casegen_app::message::{ApiFailure, Message};
use casegen_app::UpdateAction;

fn send(msg_tx: &mpsc::Sender<Message>, message: Message) {
    if let Err(e) = msg_tx.try_send(message) {
        warn!("completion channel full or closed: {e}");
    }
}

/// Spawn the background work for one action.
pub fn dispatch(action: UpdateAction, client: &ApiClient, msg_tx: &mpsc::Sender<Message>) {
    let client = client.clone();
    let msg_tx = msg_tx.clone();

    match action {
        UpdateAction::LoadWorkspace => {
            // Three independent fetches, matching the original's
            // sign-in effect.
            for sub in [
                UpdateAction::FetchStandards,
                UpdateAction::FetchRequirements,
                UpdateAction::FetchSummary,
            ] {
                dispatch(sub, &client, &msg_tx);
            }
        }

        UpdateAction::FetchStandards => {
            tokio::spawn(async move {
                let result = client.fetch_standards().await.map_err(ApiFailure::from);
                send(&msg_tx, Message::StandardsLoaded { result });
            });
        }

        UpdateAction::FetchRequirements => {
            tokio::spawn(async move {
                let result = client.fetch_requirements().await.map_err(ApiFailure::from);
                send(&msg_tx, Message::RequirementsLoaded { result });
            });
        }

        UpdateAction::FetchSummary => {
            tokio::spawn(async move {
                let result = client.fetch_summary().await.map_err(ApiFailure::from);
                send(&msg_tx, Message::SummaryLoaded { result });
            });
        }

        UpdateAction::FetchDetail { gen_id, force } => {
            tokio::spawn(async move {
                let result = client.fetch_detail(&gen_id).await.map_err(ApiFailure::from);
                send(
                    &msg_tx,
                    Message::DetailLoaded {
                        gen_id,
                        force,
                        result,
                    },
                );
            });
        }

        UpdateAction::FetchDetailForRegenerate {
            req_id,
            gen_id,
            prompt,
        } => {
            tokio::spawn(async move {
                let result = client.fetch_detail(&gen_id).await.map_err(ApiFailure::from);
                send(
                    &msg_tx,
                    Message::DetailForRegenerateLoaded {
                        req_id,
                        prompt,
                        result,
                    },
                );
            });
        }

        UpdateAction::Generate {
            requirements,
            standards,
            prompt,
        } => {
            tokio::spawn(async move {
                let request = GenerateRequest {
                    selected_requirements: requirements,
                    selected_standards: standards,
                    prompt_override: prompt_override(&prompt),
                };
                let result = client
                    .generate(&request)
                    .await
                    .map(|_| ())
                    .map_err(ApiFailure::from);
                send(&msg_tx, Message::GenerateFinished { result });
            });
        }

        UpdateAction::UploadStandard { path } => {
            tokio::spawn(async move {
                let result = client
                    .upload_standard(&path)
                    .await
                    .map(|r| r.filename)
                    .map_err(ApiFailure::from);
                send(&msg_tx, Message::StandardUploaded { result });
            });
        }

        UpdateAction::UploadRequirement { path } => {
            tokio::spawn(async move {
                let result = client
                    .upload_requirement(&path)
                    .await
                    .map(|r| r.title)
                    .map_err(ApiFailure::from);
                send(&msg_tx, Message::RequirementUploaded { result });
            });
        }

        UpdateAction::RegenerateRequirement {
            req_id,
            standards,
            prompt,
        } => {
            tokio::spawn(async move {
                let request = RegenerateRequest {
                    selected_standards: standards,
                    prompt_override: prompt_override(&prompt),
                };
                let result = client
                    .regenerate_requirement(&req_id, &request)
                    .await
                    .map_err(ApiFailure::from);
                send(&msg_tx, Message::RequirementRegenerated { req_id, result });
            });
        }

        UpdateAction::RegenerateTestcase {
            gen_id,
            tc_id,
            prompt,
        } => {
            tokio::spawn(async move {
                let request = RegenerateTestcaseRequest {
                    prompt_override: prompt_override(&prompt),
                };
                let result = client
                    .regenerate_testcase(&gen_id, &tc_id, &request)
                    .await
                    .map(|_| ())
                    .map_err(ApiFailure::from);
                send(
                    &msg_tx,
                    Message::TestcaseRegenerated {
                        gen_id,
                        tc_id,
                        result,
                    },
                );
            });
        }

        UpdateAction::SaveTestcase { gen_id, testcase } => {
            tokio::spawn(async move {
                let tc_id = testcase.tc_id.clone();
                let result = client
                    .save_testcase(&gen_id, &testcase)
                    .await
                    .map(|_| ())
                    .map_err(ApiFailure::from);
                send(
                    &msg_tx,
                    Message::TestcaseSaved {
                        gen_id,
                        tc_id,
                        result,
                    },
                );
            });
        }

        UpdateAction::CreateJira {
            gen_id,
            tc_id,
            project_key,
        } => {
            tokio::spawn(async move {
                let request = JiraRequest { project_key };
                let result = client
                    .create_jira(&gen_id, &tc_id, &request)
                    .await
                    .map(|r| r.jira)
                    .map_err(ApiFailure::from);
                send(
                    &msg_tx,
                    Message::JiraFiled {
                        gen_id,
                        tc_id,
                        result,
                    },
                );
            });
        }

        UpdateAction::RefreshAfterMutation { gen_id } => {
            // Summary first, then the forced detail fetch — the same
            // await order the mutation handlers used originally.
            tokio::spawn(async move {
                let summary = client.fetch_summary().await.map_err(ApiFailure::from);
                send(&msg_tx, Message::SummaryLoaded { result: summary });

                let detail = client.fetch_detail(&gen_id).await.map_err(ApiFailure::from);
                send(
                    &msg_tx,
                    Message::DetailLoaded {
                        gen_id,
                        force: true,
                        result: detail,
                    },
                );
            });
        }
    }
}
