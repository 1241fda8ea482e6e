//! Hard-coded targets and target-group configuration.

use crate::parse::Document;
use crate::report::{Bucket, Finding, Findings};

use super::Context;

pub fn analyze_targets(document: &Document, ctx: &Context<'_>, findings: &mut Findings) {
    if document.targets.is_set() {
        findings.push(
            Bucket::Targets,
            Finding::error("TGT001", "Targets", "Failed")
                .with_more_info("Workflows should not have any hard-coded targets"),
        );
    } else {
        findings.push(
            Bucket::Targets,
            Finding::success("TGT001", "Targets", "Passed")
                .with_more_info("The workflow does not appear to have any targets embedded in it"),
        );
    }

    let Some(groups) = document.target_groups.present() else {
        return;
    };

    for (group_id, group) in groups.iter() {
        let title = format!(
            "Target Group: {}",
            group.name.as_deref().unwrap_or(group_id)
        );
        let is_default_group = group_id == ctx.config.default_target_group_id;

        for target in &group.targets {
            if !target.selected_target_ids.is_empty() {
                findings.push(
                    Bucket::Targets,
                    Finding::warning(
                        "TGT002",
                        title.clone(),
                        "Should not contain manually selected targets",
                    )
                    .with_more_info(
                        "In the target group configuration, you probably added a specific target manually. \
                         We don't recommend doing this unless you have a specific use case and suggest you \
                         consider using target group criteria instead",
                    ),
                );
            }

            let target_type = target.data_target_type.as_deref();
            if is_default_group && !target_type.is_some_and(|t| ctx.config.is_default_target_type(t)) {
                findings.push(
                    Bucket::Targets,
                    Finding::warning(
                        "TGT003",
                        title.clone(),
                        format!(
                            "Non-default target type ({})",
                            target_type.unwrap_or("unspecified")
                        ),
                    )
                    .with_more_info(format!(
                        "By default, the Default TargetGroup doesn't contain target types besides {}. \
                         If you need additional target types for your workflow, the end user may need to \
                         add them to the target group configuration before running the workflow",
                        ctx.config.default_target_types_label()
                    )),
                );
            }
        }
    }
}
