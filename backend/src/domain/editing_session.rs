//! Multi-step builder session.
//!
//! An [`EditingSession`] is the single actor editing one website. It holds
//! the unsaved content, the current builder step and the last slug error,
//! and sequences saves before step changes and before publishing.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{
    PublishWebsiteRequest, SaveWebsiteRequest, WebsiteCommand, WebsiteHandle,
};
use crate::domain::{
    Error, LifecycleAction, UserId, WebsiteContent, WebsiteId, WebsiteRecord, WebsiteState,
    sanitize_slug_input, validate_slug,
};

/// Pages of the builder, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuilderStep {
    /// Organisation name, slug and theme.
    BasicInfo,
    /// Hero and mission content.
    HomePage,
    /// Story and leadership team.
    About,
    /// Volunteering.
    GetInvolved,
    /// Donation options.
    Donations,
    /// Contact details and social links.
    Contact,
}

impl BuilderStep {
    /// Every step in display order.
    pub const ALL: [Self; 6] = [
        Self::BasicInfo,
        Self::HomePage,
        Self::About,
        Self::GetInvolved,
        Self::Donations,
        Self::Contact,
    ];

    /// Zero-based position of the step.
    pub fn index(self) -> usize {
        match self {
            Self::BasicInfo => 0,
            Self::HomePage => 1,
            Self::About => 2,
            Self::GetInvolved => 3,
            Self::Donations => 4,
            Self::Contact => 5,
        }
    }

    /// Heading shown above the step.
    pub fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::HomePage => "Home Page",
            Self::About => "About",
            Self::GetInvolved => "Get Involved",
            Self::Donations => "Donations",
            Self::Contact => "Contact",
        }
    }

    /// Compact label for narrow layouts.
    pub fn short_title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Info",
            Self::HomePage => "Home",
            Self::About => "About",
            Self::GetInvolved => "Volunteer",
            Self::Donations => "Donate",
            Self::Contact => "Contact",
        }
    }

    /// One-line explanation of the step.
    pub fn description(self) -> &'static str {
        match self {
            Self::BasicInfo => "Tell us about your organization and choose your style",
            Self::HomePage => "Create your main page content",
            Self::About => "Share your story and team",
            Self::GetInvolved => "Help people join your cause",
            Self::Donations => "Set up donation options",
            Self::Contact => "How people can reach you",
        }
    }

    /// Following step, staying on the last one.
    pub fn next(self) -> Self {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(Self::Contact)
    }

    /// Preceding step, staying on the first one.
    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or(Self::BasicInfo)
    }
}

fn is_slug_error(error: &Error) -> bool {
    error
        .details()
        .and_then(|details| details.get("field"))
        .and_then(serde_json::Value::as_str)
        == Some("slug")
}

/// One person editing one website.
pub struct EditingSession<C: ?Sized> {
    command: Arc<C>,
    owner_id: UserId,
    website_id: Option<WebsiteId>,
    state: WebsiteState,
    content: WebsiteContent,
    step: BuilderStep,
    slug_error: Option<Error>,
}

impl<C> EditingSession<C>
where
    C: WebsiteCommand + ?Sized,
{
    /// Begin a new, unsaved website named after the project.
    pub fn start(command: Arc<C>, owner_id: UserId, project_name: &str) -> Self {
        Self {
            command,
            owner_id,
            website_id: None,
            state: WebsiteState::Unsaved,
            content: WebsiteContent::for_project(project_name),
            step: BuilderStep::BasicInfo,
            slug_error: None,
        }
    }

    /// Continue editing a persisted website.
    pub fn resume(command: Arc<C>, record: WebsiteRecord) -> Self {
        Self {
            command,
            state: record.state(),
            owner_id: record.owner_id,
            website_id: Some(record.id),
            content: record.content,
            step: BuilderStep::BasicInfo,
            slug_error: None,
        }
    }

    /// Current lifecycle state as known to the session.
    pub fn state(&self) -> WebsiteState {
        self.state
    }

    /// Id of the persisted website, once saved.
    pub fn website_id(&self) -> Option<WebsiteId> {
        self.website_id
    }

    /// Content being edited.
    pub fn content(&self) -> &WebsiteContent {
        &self.content
    }

    /// Mutable access for editing fields that carry no validation.
    pub fn content_mut(&mut self) -> &mut WebsiteContent {
        &mut self.content
    }

    /// Active builder step.
    pub fn step(&self) -> BuilderStep {
        self.step
    }

    /// Last slug problem, from local validation or a failed save.
    pub fn slug_error(&self) -> Option<&Error> {
        self.slug_error.as_ref()
    }

    /// Rename the organisation. The slug is left untouched.
    pub fn set_org_name(&mut self, org_name: impl Into<String>) {
        self.content.org_name = org_name.into();
    }

    /// Store a slug typed by the user after sanitising it, then validate it.
    pub fn set_slug(&mut self, raw: &str) {
        let slug = sanitize_slug_input(raw);
        self.slug_error = validate_slug(&slug).err().map(Error::from);
        self.content.slug = slug;
    }

    fn basic_info_complete(&self) -> bool {
        !self.content.org_name.trim().is_empty()
            && !self.content.slug.is_empty()
            && self.slug_error.is_none()
            && validate_slug(&self.content.slug).is_ok()
    }

    /// Whether the active step is complete enough to move on.
    pub fn can_proceed(&self) -> bool {
        self.step != BuilderStep::BasicInfo || self.basic_info_complete()
    }

    /// Whether `step` may be opened directly.
    pub fn can_navigate_to(&self, step: BuilderStep) -> bool {
        step == BuilderStep::BasicInfo || self.basic_info_complete()
    }

    /// Jump to `step` when allowed; returns whether the step changed.
    pub fn navigate_to(&mut self, step: BuilderStep) -> bool {
        if !self.can_navigate_to(step) {
            return false;
        }
        self.step = step;
        true
    }

    /// Whether publishing may be attempted.
    pub fn can_publish(&self) -> bool {
        self.basic_info_complete()
    }

    fn record_outcome(
        &mut self,
        outcome: Result<WebsiteRecord, Error>,
    ) -> Result<WebsiteRecord, Error> {
        match outcome {
            Ok(record) => {
                self.website_id = Some(record.id);
                self.state = record.state();
                self.slug_error = None;
                Ok(record)
            }
            Err(error) => {
                if is_slug_error(&error) {
                    self.slug_error = Some(error.clone());
                }
                debug!(owner_id = %self.owner_id, %error, "editing session transition failed");
                Err(error)
            }
        }
    }

    /// Persist the current content.
    pub async fn save(&mut self) -> Result<WebsiteRecord, Error> {
        self.state.apply(LifecycleAction::Save)?;
        self.slug_error = None;
        let outcome = self
            .command
            .save(SaveWebsiteRequest {
                owner_id: self.owner_id.clone(),
                website_id: self.website_id,
                content: self.content.clone(),
            })
            .await;
        self.record_outcome(outcome)
    }

    /// Auto-save, then move to the next step when the current one is
    /// complete.
    pub async fn advance(&mut self) -> Result<BuilderStep, Error> {
        self.save().await?;
        if self.can_proceed() {
            self.step = self.step.next();
        }
        Ok(self.step)
    }

    /// Move to the previous step without saving.
    pub fn back(&mut self) -> BuilderStep {
        self.step = self.step.previous();
        self.step
    }

    /// Save if needed, then publish the session's content.
    pub async fn publish(&mut self) -> Result<WebsiteRecord, Error> {
        if !self.can_publish() {
            return Err(self.slug_error.clone().unwrap_or_else(|| {
                Error::invalid_request("Organization name and URL slug are required to publish")
            }));
        }
        if self.state == WebsiteState::Unsaved {
            self.save().await?;
        }
        let handle = self.handle(LifecycleAction::Publish)?;
        let outcome = self
            .command
            .publish(PublishWebsiteRequest {
                handle,
                content: Some(self.content.clone()),
            })
            .await;
        self.record_outcome(outcome)
    }

    /// Hide the website from the public.
    pub async fn unpublish(&mut self) -> Result<WebsiteRecord, Error> {
        let handle = self.handle(LifecycleAction::Unpublish)?;
        let outcome = self.command.unpublish(handle).await;
        self.record_outcome(outcome)
    }

    fn handle(&self, action: LifecycleAction) -> Result<WebsiteHandle, Error> {
        self.state.apply(action)?;
        let website_id = self
            .website_id
            .ok_or_else(|| Error::internal("persisted website has no id"))?;
        Ok(WebsiteHandle::new(self.owner_id.clone(), website_id))
    }
}

#[cfg(test)]
#[path = "editing_session_tests.rs"]
mod tests;
