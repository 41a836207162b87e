//! Messages returned by the default rules. Each one addresses the developer
//! first and the assistant second; `[NAME]` placeholders are filled from the
//! rule's action.

// ---------------------------------------------------------------------------
// Context gathering
// ---------------------------------------------------------------------------

pub const CONTEXT_CREATED: &str = "\
## Response to the Developer
Created `.ai/task/context.md`. Describe the problem, link any Jira or Confluence pages, and cast Accio when the context is ready.

## Response to the AI
Help the developer fill in `.ai/task/context.md`. Ask about goals, constraints and relevant code. Do not start planning yet.
";

pub const PLAN_CREATED: &str = "\
## Response to the Developer
Context captured. Created `.ai/task/plan.md`; review the acceptance criteria the assistant drafts, then cast Accio to start the first task.

## Response to the AI
Read `.ai/task/context.md` and `.ai/plan-guide.md`, then write the plan in `.ai/task/plan.md` with acceptance criteria as `- [ ]` checklist items.
";

pub const PLAN_CREATED_WITH_REFS: &str = "\
## Response to the Developer
Context captured. Created `.ai/task/plan.md`. The context links these Atlassian pages:

[ATLASSIAN_URLS]

Cast Expecto to pull them in, or Accio once the plan is ready.

## Response to the AI
Read `.ai/task/context.md` and `.ai/plan-guide.md`, then write the plan in `.ai/task/plan.md` with acceptance criteria as `- [ ]` checklist items. Fetch the linked Atlassian pages if you have access to them.
";

pub const CONTEXT_MISSING: &str = "\
## Response to the Developer
`.ai/task/context.md` is missing. Cast Accio to recreate it.

## Response to the AI
Stop. The context file was removed; wait for the developer to recreate it.
";

pub const CONTEXT_RECREATED: &str = "\
## Response to the Developer
Recreated `.ai/task/context.md`. Fill it in and cast Accio to continue.

## Response to the AI
Help the developer fill in `.ai/task/context.md` again.
";

pub const FINITE_ALREADY_GATHERING: &str = "\
## Response to the Developer
Nothing to return to yet: no plan exists. Keep gathering context and cast Accio when ready.

## Response to the AI
No action needed.
";

pub const EXPECTO_NEEDS_CONTEXT: &str = "\
## Response to the Developer
Expecto reads Atlassian links from the context, which has not been started. Cast Accio first.

## Response to the AI
No action needed.
";

pub const REPARO_NEEDS_PLAN: &str = "\
## Response to the Developer
A PR review can only start once there is a plan. Finish gathering context first.

## Response to the AI
No action needed.
";

// ---------------------------------------------------------------------------
// Task execution
// ---------------------------------------------------------------------------

pub const TASK_CREATED: &str = "\
## Response to the Developer
Created `.ai/task/task.md` for the next piece of work. Review the draft and cast Accio to mark it executed.

## Response to the AI
Read `.ai/task/plan.md` and `.ai/task-guide.md`. Pick the next pending acceptance criterion, write the task in `.ai/task/task.md` (set `task_name` in the front matter) and carry it out.
";

pub const TASK_EXISTS: &str = "\
## Response to the Developer
Resuming the existing task document.

## Response to the AI
Continue with the existing task document:

[TASK_CONTENT]
";

pub const PLAN_MISSING: &str = "\
## Response to the Developer
`.ai/task/plan.md` is missing. Cast Accio to start over from context gathering.

## Response to the AI
Stop. The plan file was removed.
";

pub const PLAN_NO_PENDING: &str = "\
## Response to the Developer
The plan has no pending acceptance criteria. Add at least one `- [ ]` item to `.ai/task/plan.md` and cast Accio again.

## Response to the AI
Help the developer add acceptance criteria to the plan as `- [ ]` checklist items.
";

pub const TASK_EXECUTED: &str = "\
## Response to the Developer
Task marked executed. When the work is done, the assistant records the outcome in `.ai/task/task-results.md`; cast Accio to archive it and draft the next task.

## Response to the AI
Write `.ai/task/task-results.md`: what changed, how it was verified, and which acceptance criteria in `.ai/task/plan.md` are now complete (tick them with `- [x]`).
";

pub const TASK_MISSING: &str = "\
## Response to the Developer
`.ai/task/task.md` is missing. Cast Accio to create a fresh task.

## Response to the AI
Stop. The task file was removed.
";

pub const TASK_ARCHIVED: &str = "\
## Response to the Developer
Archived the task to `[ARCHIVE_DIR]` and created a new `.ai/task/task.md`.

## Response to the AI
Results of the previous task:

[TASK_RESULTS]

Use them to choose the next pending acceptance criterion and draft the new task.
";

pub const TASK_RESULTS_MISSING: &str = "\
## Response to the Developer
`.ai/task/task-results.md` is missing. Cast Accio to archive the task as incomplete and draft a new one.

## Response to the AI
Stop. Results must be written before the task can be archived.
";

pub const ALL_CRITERIA_COMPLETE: &str = "\
## Response to the Developer
Every acceptance criterion in the plan is complete. Cast Finite to return to the plan and add more, or Reparo to start a PR review.

## Response to the AI
Summarize what was delivered against the plan.
";

pub const ALREADY_COMPLETE: &str = "\
## Response to the Developer
The plan is already complete. Cast Finite to return to the plan or Reparo to review.

## Response to the AI
No action needed.
";

pub const FINITE_DURING_EXECUTION: &str = "\
## Response to the Developer
A task is being executed. Record its results and cast Accio before returning to the plan.

## Response to the AI
No action needed.
";

// ---------------------------------------------------------------------------
// PR review
// ---------------------------------------------------------------------------

pub const REVIEW_STARTED: &str = "\
## Response to the Developer
Started a PR review. Paste the reviewer comments into `.ai/task/comments.md` and cast Accio.

## Response to the AI
Help the developer collect every PR comment into `.ai/task/comments.md`, one section per comment with file and line.
";

pub const REVIEW_RESTARTED: &str = "\
## Response to the Developer
Archived the previous review to `[ARCHIVE_DIR]` and started a new one. Paste the reviewer comments into `.ai/task/comments.md` and cast Accio.

## Response to the AI
Help the developer collect every PR comment into `.ai/task/comments.md`.
";

pub const CONFIRM_RESTART_COMMENTS: &str = "\
## Response to the Developer
`.ai/task/comments.md` already exists from an earlier review. Cast Reparo again to archive it and start over, or Accio to continue with it.

## Response to the AI
Wait for the developer to choose.
";

pub const CONFIRM_RESTART_TASK: &str = "\
## Response to the Developer
`.ai/task/review-task.md` already exists from an earlier review. Cast Reparo again to archive it and start over, or Accio to continue with it.

## Response to the AI
Wait for the developer to choose.
";

pub const CONTINUE_COMMENTS: &str = "\
## Response to the Developer
Continuing the existing review. Finish `.ai/task/comments.md` and cast Accio.

## Response to the AI
Review `.ai/task/comments.md` with the developer and fill any gaps.
";

pub const REVIEW_TASK_CREATED: &str = "\
## Response to the Developer
Created `.ai/task/review-task.md`. The assistant turns the comments into concrete changes; cast Accio once they are applied.

## Response to the AI
Read `.ai/task/comments.md`, write the changes needed for each comment in `.ai/task/review-task.md`, then apply them.
";

pub const CONTINUE_REVIEW_TASK: &str = "\
## Response to the Developer
Continuing with the existing `.ai/task/review-task.md`. Cast Accio once the changes are applied.

## Response to the AI
Apply the changes listed in `.ai/task/review-task.md`.
";

pub const COMMENTS_MISSING: &str = "\
## Response to the Developer
`.ai/task/comments.md` is missing. Cast Accio to recreate it.

## Response to the AI
Stop. The review comments were removed.
";

pub const REVIEW_APPLIED: &str = "\
## Response to the Developer
Review changes applied. The assistant records what changed in `.ai/task/review-task-results.md`; cast Accio to archive the review.

## Response to the AI
Write `.ai/task/review-task-results.md`: for each comment, what was changed and where.
";

pub const REVIEW_TASK_MISSING: &str = "\
## Response to the Developer
`.ai/task/review-task.md` is missing. Cast Accio to recreate it.

## Response to the AI
Stop. The review task was removed.
";

pub const REVIEW_RESULTS_MISSING: &str = "\
## Response to the Developer
`.ai/task/review-task-results.md` is missing. Cast Accio to return to the review task.

## Response to the AI
Stop. Review results must be written before the review can be archived.
";

pub const REVIEW_ARCHIVED_TO_PLAN: &str = "\
## Response to the Developer
Archived the review to `[ARCHIVE_DIR]`. Back to editing the plan.

## Response to the AI
MANDATORY ACTION FOR AI: read the archived review-task-results.md below to understand what changes were made, and update `.ai/task/plan.md` if they affect the acceptance criteria.

[REVIEW_RESULTS]
";

pub const REVIEW_ARCHIVED_TO_TASK: &str = "\
## Response to the Developer
Archived the review to `[ARCHIVE_DIR]`. Back to the current task.

## Response to the AI
MANDATORY ACTION FOR AI: read the archived review-task-results.md below to understand what changes were made, then continue with `.ai/task/task.md`.

[REVIEW_RESULTS]
";

pub const REVIEW_ARCHIVED_NEW_TASK: &str = "\
## Response to the Developer
Archived the review to `[ARCHIVE_DIR]` and created a new `.ai/task/task.md`.

## Response to the AI
MANDATORY ACTION FOR AI: read the archived review-task-results.md below to understand what changes were made, then draft the next task.

[REVIEW_RESULTS]
";

pub const REVIEW_IN_PROGRESS: &str = "\
## Response to the Developer
A PR review is in progress. Cast Accio to continue it or Reverto to leave it.

## Response to the AI
No action needed.
";

pub const REVIEW_PENDING_ARCHIVE: &str = "\
## Response to the Developer
Review changes were applied but not archived. Record the results and cast Accio first.

## Response to the AI
No action needed.
";

pub const CONFIRMATION_PENDING: &str = "\
## Response to the Developer
Waiting for confirmation: cast Reparo to restart the review or Accio to continue it.

## Response to the AI
No action needed.
";

pub const REVERTO_NOT_IN_REVIEW: &str = "\
## Response to the Developer
There is no PR review to leave. Reverto only exits a review.

## Response to the AI
No action needed.
";

// ---------------------------------------------------------------------------
// Error recovery
// ---------------------------------------------------------------------------

pub const TASK_RECREATED: &str = "\
## Response to the Developer
Created a fresh `.ai/task/task.md`.

## Response to the AI
Read `.ai/task/plan.md` and draft the next task in `.ai/task/task.md`.
";

pub const TASK_RESULTS_RECOVERED: &str = "\
## Response to the Developer
Found the task results. Archived the task to `[ARCHIVE_DIR]` and created a new `.ai/task/task.md`.

## Response to the AI
Results of the previous task:

[TASK_RESULTS]

Draft the next task from the remaining acceptance criteria.
";

pub const INCOMPLETE_TASK_ARCHIVED: &str = "\
## Response to the Developer
Archived the unfinished task to `[ARCHIVE_DIR]` without results and created a new `.ai/task/task.md`.

## Response to the AI
The previous task was abandoned. Draft a new task from the remaining acceptance criteria.
";

pub const PLAN_RESTART: &str = "\
## Response to the Developer
Starting over from context gathering. Cast Accio to create the context file.

## Response to the AI
No action needed.
";

pub const RESOLVE_ERROR_FIRST: &str = "\
## Response to the Developer
The workflow is in an error state. Cast Accio to recover before using other spells.

## Response to the AI
No action needed.
";

// ---------------------------------------------------------------------------
// Universal
// ---------------------------------------------------------------------------

pub const RETURN_TO_PLAN: &str = "\
## Response to the Developer
Back to editing the plan. Adjust `.ai/task/plan.md` and cast Accio to continue.

## Response to the AI
Help the developer revise the acceptance criteria in `.ai/task/plan.md`.
";

pub const REVIEW_EXITED_TO_PLAN: &str = "\
## Response to the Developer
Left the PR review. Back to editing the plan; review files were kept.

## Response to the AI
No action needed.
";

pub const REVIEW_EXITED_TO_DRAFTING: &str = "\
## Response to the Developer
Left the PR review. Back to drafting the current task.

## Response to the AI
Continue with `.ai/task/task.md`.
";

pub const REVIEW_EXITED_TO_EXECUTED: &str = "\
## Response to the Developer
Left the PR review. The current task already has results; cast Accio to archive it.

## Response to the AI
No action needed.
";

pub const EXPECTO_ONLY_WHILE_EDITING: &str = "\
## Response to the Developer
Expecto only works while editing the context or the plan.

## Response to the AI
No action needed.
";

pub const STATUS: &str = "\
## Response to the Developer
Current state: [CURRENT_STATE]
[STATE_DESCRIPTION]

Workspace files:
[WORKSPACE_FILES]

## Response to the AI
Report the current state to the developer. Do not change any files.
";

pub const EXPECTO_NEW_REFS: &str = "\
## Response to the Developer
Found new Atlassian references in `[SOURCE_FILE]`:

[ATLASSIAN_URLS]

## Response to the AI
Fetch each page above, summarize what matters for this work, and add the summary to `[SOURCE_FILE]`.
";

pub const EXPECTO_NO_REFS: &str = "\
## Response to the Developer
`[SOURCE_FILE]` contains no Atlassian links.

## Response to the AI
No action needed.
";

pub const EXPECTO_ALL_PROCESSED: &str = "\
## Response to the Developer
Every Atlassian link in `[SOURCE_FILE]` has already been processed.

## Response to the AI
No action needed.
";
