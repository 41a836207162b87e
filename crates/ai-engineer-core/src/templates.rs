//! Starting content for the workflow files.

pub const CONTEXT: &str = "\
# Context

## Problem

What needs to change, and why?

## Background

Relevant systems, code paths and prior decisions. Paste Jira or Confluence links here.

## Constraints

Deadlines, compatibility requirements, things that must not change.
";

pub const PLAN: &str = "\
# Plan

## Summary

One paragraph describing the outcome.

## Acceptance Criteria

- [ ] First observable outcome

## Notes
";

pub const TASK: &str = "\
---
task_name: 'short-kebab-name'
---

# Task

## Objective

## Acceptance Criteria

Which plan criteria this task works toward.

## Steps

1. [ ] First step

## Verification

- [ ] How the result will be checked
";

pub const COMMENTS: &str = "\
# PR Review Comments

## Comment 1

- File:
- Line:
- Reviewer:

> Comment text
";

pub const REVIEW_TASK: &str = "\
# Review Task

## Changes

For each comment in comments.md, the change that addresses it.

1. [ ] Comment 1:

## Verification

- [ ] Tests pass
";

pub const PLAN_GUIDE: &str = "\
# Plan Guide

A plan states the outcome and lists acceptance criteria as a checklist:

- `- [ ]` marks a pending criterion.
- `- [x]` marks a completed one.

Each criterion should be observable and testable. Work proceeds one task per
criterion; the plan is complete when no `- [ ]` items remain.
";

pub const TASK_GUIDE: &str = "\
# Task Guide

A task is one focused unit of work toward a plan criterion.

- Set `task_name` in the front matter; it names the archive folder.
- List concrete steps and how each will be verified.
- When done, write task-results.md with what changed and which criteria are now complete.
";
