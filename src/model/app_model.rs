//! Main application model with state management

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::dataset::SpotRepository;
use super::flow::{ActionFlow, FlowKind, PhotoSource};
use super::form::{FormDraft, RatingKind, SpotLocation};
use super::profile::UserProfile;
use super::query::{category_counts, query, QueryStats, SortKey};
use super::spot::{Category, Coordinates, Spot};
use super::toast::{Toast, ToastQueue};
use super::types::{DetailState, DiscoveryState, FormField, Screen, UiState};
use crate::devices::SubmissionAck;

/// Everything the Spots screen needs for one frame
#[derive(Clone, Debug)]
pub struct DiscoveryView {
    pub city: String,
    pub search_text: String,
    pub category: Option<Category>,
    pub sort: SortKey,
    pub is_filtered: bool,
    pub results: Vec<Spot>,
    pub stats: QueryStats,
    pub category_counts: BTreeMap<Category, usize>,
    pub total_spots: usize,
    pub is_refreshing: bool,
    pub is_locating: bool,
    pub user_location: Option<Coordinates>,
}

/// Everything the Add Spot screen needs for one frame
#[derive(Clone, Debug)]
pub struct FormView {
    pub draft: FormDraft,
    pub location_busy: bool,
    pub photo_busy: bool,
    pub submitting: bool,
}

/// Everything the Profile screen needs for one frame
#[derive(Clone, Debug)]
pub struct ProfileView {
    pub profile: UserProfile,
    pub my_spots: Vec<Spot>,
    pub favorites: Vec<Spot>,
    pub activity: Vec<Toast>,
}

/// The async action flows, one per user action
#[derive(Clone)]
pub struct Flows {
    pub nearby_location: ActionFlow<Coordinates>,
    pub spot_location: ActionFlow<SpotLocation>,
    pub library_photo: ActionFlow<String>,
    pub camera_photo: ActionFlow<String>,
    pub submit: ActionFlow<SubmissionAck>,
}

impl Flows {
    fn new() -> Self {
        let library_photo = ActionFlow::new(FlowKind::Photo(PhotoSource::Library));
        let camera_photo = library_photo.sharing_state(FlowKind::Photo(PhotoSource::Camera));
        Self {
            nearby_location: ActionFlow::new(FlowKind::NearbyLocation),
            spot_location: ActionFlow::new(FlowKind::SpotLocation),
            library_photo,
            camera_photo,
            submit: ActionFlow::new(FlowKind::Submit),
        }
    }

    pub fn photo(&self, source: PhotoSource) -> &ActionFlow<String> {
        match source {
            PhotoSource::Library => &self.library_photo,
            PhotoSource::Camera => &self.camera_photo,
        }
    }

    /// Camera and library share one state, so one busy check covers both
    pub async fn photo_busy(&self) -> bool {
        self.library_photo.is_in_progress().await
    }
}

/// Main application model containing all state
pub struct AppModel {
    repository: Arc<SpotRepository>,
    profile: UserProfile,
    city: String,
    flow_timeout: Duration,
    pub toasts: ToastQueue,
    pub flows: Flows,
    pub ui_state: Arc<Mutex<UiState>>,
    pub discovery: Arc<Mutex<DiscoveryState>>,
    pub form: Arc<Mutex<FormDraft>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(repository: SpotRepository, city: impl Into<String>, toasts: ToastQueue, flow_timeout: Duration) -> Self {
        Self {
            repository: Arc::new(repository),
            profile: UserProfile::demo(),
            city: city.into(),
            flow_timeout,
            toasts,
            flows: Flows::new(),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            discovery: Arc::new(Mutex::new(DiscoveryState::default())),
            form: Arc::new(Mutex::new(FormDraft::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn profile_name(&self) -> &str {
        &self.profile.name
    }

    pub fn flow_timeout(&self) -> Duration {
        self.flow_timeout
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    // ========================================================================
    // Screens & Overlays
    // ========================================================================

    pub async fn cycle_screen_forward(&self) {
        self.switch_screen(Screen::next).await;
    }

    pub async fn cycle_screen_backward(&self) {
        self.switch_screen(Screen::prev).await;
    }

    /// Leaving Add Spot throws the unsubmitted draft away
    async fn switch_screen(&self, step: fn(Screen) -> Screen) {
        let mut state = self.ui_state.lock().await;
        if state.screen == Screen::AddSpot {
            tracing::debug!("Leaving Add Spot, discarding draft");
            self.form.lock().await.reset();
            state.tip_input.clear();
            state.photo_selected = 0;
            state.form_field = FormField::Name;
        }
        state.screen = step(state.screen);
        state.search_editing = false;
        state.detail = None;
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn cycle_profile_tab(&self, forward: bool) {
        let mut state = self.ui_state.lock().await;
        state.profile_tab = if forward {
            state.profile_tab.next()
        } else {
            state.profile_tab.prev()
        };
    }

    // ========================================================================
    // Discovery (search, filters, sorting, selection)
    // ========================================================================

    pub async fn get_discovery_view(&self) -> DiscoveryView {
        let state = self.discovery.lock().await.clone();
        let spots = self.repository.spots();
        let results = query(spots, &state.query);
        let stats = QueryStats::from_results(&results);

        DiscoveryView {
            city: self.city.clone(),
            search_text: state.query.search_text.clone(),
            category: state.query.category,
            sort: state.query.sort,
            is_filtered: state.query.is_filtered(),
            results: results.into_iter().cloned().collect(),
            stats,
            category_counts: category_counts(spots),
            total_spots: spots.len(),
            is_refreshing: state.is_refreshing,
            is_locating: self.flows.nearby_location.is_in_progress().await,
            user_location: state.user_location,
        }
    }

    pub async fn set_search_editing(&self, editing: bool) {
        self.ui_state.lock().await.search_editing = editing;
    }

    pub async fn append_to_search(&self, c: char) {
        self.discovery.lock().await.query.search_text.push(c);
        self.reset_spot_selection().await;
    }

    pub async fn backspace_search(&self) {
        self.discovery.lock().await.query.search_text.pop();
        self.reset_spot_selection().await;
    }

    pub async fn cycle_category(&self, forward: bool) -> Option<Category> {
        let mut state = self.discovery.lock().await;
        state.query.category = if forward {
            Category::cycle(state.query.category)
        } else {
            Category::cycle_back(state.query.category)
        };
        let category = state.query.category;
        drop(state);
        self.reset_spot_selection().await;
        category
    }

    pub async fn cycle_sort(&self) -> SortKey {
        let mut state = self.discovery.lock().await;
        state.query.sort = state.query.sort.next();
        let sort = state.query.sort;
        drop(state);
        self.reset_spot_selection().await;
        sort
    }

    /// Back to all categories, empty search, top rated
    pub async fn clear_filters(&self) {
        let mut state = self.discovery.lock().await;
        state.query = Default::default();
        drop(state);
        let mut ui = self.ui_state.lock().await;
        ui.search_editing = false;
        ui.spot_selected = 0;
    }

    /// Mark a refresh as running; `false` when one already is
    pub async fn begin_refresh(&self) -> bool {
        let mut state = self.discovery.lock().await;
        if state.is_refreshing {
            return false;
        }
        state.is_refreshing = true;
        true
    }

    pub async fn end_refresh(&self) {
        self.discovery.lock().await.is_refreshing = false;
    }

    pub async fn set_user_location(&self, coordinates: Coordinates) {
        self.discovery.lock().await.user_location = Some(coordinates);
    }

    async fn reset_spot_selection(&self) {
        self.ui_state.lock().await.spot_selected = 0;
    }

    pub async fn move_spot_selection(&self, down: bool) {
        let count = self.get_discovery_view().await.results.len();
        let mut state = self.ui_state.lock().await;
        if down {
            if state.spot_selected < count.saturating_sub(1) {
                state.spot_selected += 1;
            }
        } else {
            state.spot_selected = state.spot_selected.saturating_sub(1);
        }
    }

    /// Look a spot up by id in the whole dataset, whatever the filters say
    pub fn spot(&self, id: &str) -> Option<Spot> {
        self.repository.get(id).cloned()
    }

    pub async fn get_selected_spot(&self) -> Option<Spot> {
        let view = self.get_discovery_view().await;
        let selected = self.ui_state.lock().await.spot_selected;
        view.results.get(selected).cloned()
    }

    // ========================================================================
    // Spot Detail
    // ========================================================================

    pub async fn open_detail(&self, spot_id: String) {
        let mut state = self.ui_state.lock().await;
        state.search_editing = false;
        state.detail = Some(DetailState {
            spot_id,
            ..Default::default()
        });
    }

    pub async fn close_detail(&self) {
        self.ui_state.lock().await.detail = None;
    }

    #[cfg(test)]
    pub async fn is_detail_open(&self) -> bool {
        self.ui_state.lock().await.detail.is_some()
    }

    /// Step through the gallery, wrapping at both ends
    pub async fn cycle_detail_photo(&self, forward: bool) {
        let mut state = self.ui_state.lock().await;
        let Some(detail) = state.detail.as_mut() else {
            return;
        };
        let count = self
            .repository
            .get(&detail.spot_id)
            .map(|s| s.photos.len())
            .unwrap_or(0);
        if count == 0 {
            return;
        }
        detail.photo_index = if forward {
            (detail.photo_index + 1) % count
        } else {
            (detail.photo_index + count - 1) % count
        };
    }

    pub async fn toggle_detail_anonymous(&self) {
        if let Some(detail) = self.ui_state.lock().await.detail.as_mut() {
            detail.anonymous = !detail.anonymous;
        }
    }

    pub async fn set_composing(&self, composing: bool) {
        if let Some(detail) = self.ui_state.lock().await.detail.as_mut() {
            detail.composing = composing;
        }
    }

    pub async fn edit_comment(&self, c: Option<char>) {
        if let Some(detail) = self.ui_state.lock().await.detail.as_mut() {
            match c {
                Some(c) => detail.comment.push(c),
                None => {
                    detail.comment.pop();
                }
            }
        }
    }

    /// Take the trimmed comment out of the composer; `None` when blank
    pub async fn take_comment(&self) -> Option<(String, String, bool)> {
        let mut state = self.ui_state.lock().await;
        let detail = state.detail.as_mut()?;
        let text = detail.comment.trim().to_string();
        if text.is_empty() {
            return None;
        }
        detail.comment.clear();
        detail.composing = false;
        Some((detail.spot_id.clone(), text, detail.anonymous))
    }

    // ========================================================================
    // Add Spot Form
    // ========================================================================

    pub async fn get_form_view(&self) -> FormView {
        FormView {
            draft: self.form.lock().await.clone(),
            location_busy: self.flows.spot_location.is_in_progress().await,
            photo_busy: self.flows.photo_busy().await,
            submitting: self.flows.submit.is_in_progress().await,
        }
    }

    pub async fn get_form_draft(&self) -> FormDraft {
        self.form.lock().await.clone()
    }

    pub async fn move_form_focus(&self, down: bool) {
        let mut state = self.ui_state.lock().await;
        state.form_field = if down {
            state.form_field.next()
        } else {
            state.form_field.prev()
        };
    }

    /// Type into (or, with `None`, backspace) the focused text row
    pub async fn edit_form_text(&self, c: Option<char>) {
        let mut ui = self.ui_state.lock().await;
        let field = ui.form_field;
        if field == FormField::Tips {
            match c {
                Some(c) => ui.tip_input.push(c),
                None => {
                    ui.tip_input.pop();
                }
            }
            return;
        }
        drop(ui);

        let mut draft = self.form.lock().await;
        let target = match field {
            FormField::Name => &mut draft.name,
            FormField::Description => &mut draft.description,
            FormField::Story => &mut draft.story,
            _ => return,
        };
        match c {
            Some(c) => target.push(c),
            None => {
                target.pop();
            }
        }
    }

    pub async fn cycle_form_category(&self, forward: bool) {
        let mut draft = self.form.lock().await;
        let next = if forward {
            Category::cycle(draft.category)
        } else {
            Category::cycle_back(draft.category)
        };
        // the form never goes back to "no category" once one is picked
        draft.category = next.or(draft.category).or(Some(Category::ALL[0]));
    }

    pub async fn adjust_rating(&self, kind: RatingKind, up: bool) {
        let mut draft = self.form.lock().await;
        let current = draft.ratings.get(kind);
        let value = if up { current.saturating_add(1) } else { current.saturating_sub(1) };
        draft.set_rating(kind, value);
    }

    pub async fn move_photo_selection(&self, forward: bool) {
        let count = self.form.lock().await.photos.len();
        let mut state = self.ui_state.lock().await;
        if forward {
            if state.photo_selected + 1 < count {
                state.photo_selected += 1;
            }
        } else {
            state.photo_selected = state.photo_selected.saturating_sub(1);
        }
    }

    pub async fn remove_selected_photo(&self) -> Option<String> {
        let mut state = self.ui_state.lock().await;
        let mut draft = self.form.lock().await;
        let removed = draft.remove_photo(state.photo_selected);
        if state.photo_selected >= draft.photos.len() {
            state.photo_selected = draft.photos.len().saturating_sub(1);
        }
        removed
    }

    /// Move the typed tip into the draft
    pub async fn commit_tip(&self) -> bool {
        let mut ui = self.ui_state.lock().await;
        let added = self.form.lock().await.add_tip(&ui.tip_input);
        if added {
            ui.tip_input.clear();
        }
        added
    }

    pub async fn remove_last_tip(&self) -> Option<String> {
        let mut draft = self.form.lock().await;
        let last = draft.tips.len().checked_sub(1)?;
        draft.remove_tip(last)
    }

    /// Apply `edit` to the draft only while it is still generation
    /// `generation`; `None` once that draft has been reset or discarded
    pub async fn edit_form_if<R>(&self, generation: u64, edit: impl FnOnce(&mut FormDraft) -> R) -> Option<R> {
        let mut draft = self.form.lock().await;
        if draft.generation() != generation {
            tracing::debug!(expected = generation, current = draft.generation(), "Draft replaced, dropping late result");
            return None;
        }
        Some(edit(&mut draft))
    }

    /// Clear the draft and the form's input state, unless the draft has
    /// already moved past `generation`
    pub async fn reset_form_if(&self, generation: u64) -> bool {
        let mut ui = self.ui_state.lock().await;
        let mut draft = self.form.lock().await;
        if draft.generation() != generation {
            tracing::debug!(expected = generation, current = draft.generation(), "Draft replaced, not resetting");
            return false;
        }
        draft.reset();
        ui.tip_input.clear();
        ui.photo_selected = 0;
        ui.form_field = FormField::Name;
        true
    }

    // ========================================================================
    // Profile
    // ========================================================================

    pub async fn get_profile_view(&self) -> ProfileView {
        ProfileView {
            profile: self.profile.clone(),
            my_spots: self.profile.my_spots(&self.repository).into_iter().cloned().collect(),
            favorites: self.profile.favorites(&self.repository).into_iter().cloned().collect(),
            activity: self.toasts.history().await,
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(
            SpotRepository::gwalior(),
            "Gwalior",
            ToastQueue::default(),
            Duration::from_secs(15),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn typing_filters_and_resets_selection() {
        let model = AppModel::default();
        model.move_spot_selection(true).await;
        model.move_spot_selection(true).await;
        assert_eq!(model.get_ui_state().await.spot_selected, 2);

        for c in "SUNSET".chars() {
            model.append_to_search(c).await;
        }
        let view = model.get_discovery_view().await;
        assert_eq!(view.results.len(), 1);
        assert_eq!(view.results[0].name, "Sunset Point at Gwalior Fort");
        assert_eq!(view.total_spots, 4);
        assert_eq!(model.get_ui_state().await.spot_selected, 0);

        model.backspace_search().await;
        assert_eq!(model.get_discovery_view().await.search_text, "SUNSE");
    }

    #[tokio::test]
    async fn selection_stays_within_results() {
        let model = AppModel::default();
        for _ in 0..10 {
            model.move_spot_selection(true).await;
        }
        assert_eq!(model.get_ui_state().await.spot_selected, 3);
        assert_eq!(
            model.get_selected_spot().await.map(|s| s.name),
            Some("Tighra Dam Viewpoint".to_string())
        );

        model.move_spot_selection(false).await;
        assert_eq!(model.get_ui_state().await.spot_selected, 2);
    }

    #[tokio::test]
    async fn clear_filters_restores_defaults() {
        let model = AppModel::default();
        model.append_to_search('x').await;
        model.cycle_category(true).await;
        model.cycle_sort().await;

        model.clear_filters().await;
        let view = model.get_discovery_view().await;
        assert_eq!(view.search_text, "");
        assert_eq!(view.category, None);
        assert_eq!(view.sort, SortKey::Rating);
        assert_eq!(view.results.len(), 4);
    }

    #[tokio::test]
    async fn refresh_guard_rejects_overlap() {
        let model = AppModel::default();
        assert!(model.begin_refresh().await);
        assert!(!model.begin_refresh().await);
        model.end_refresh().await;
        assert!(model.begin_refresh().await);
    }

    #[tokio::test]
    async fn detail_gallery_wraps_around() {
        let model = AppModel::default();
        model.open_detail("1".to_string()).await;
        model.cycle_detail_photo(false).await;
        assert_eq!(model.get_ui_state().await.detail.unwrap().photo_index, 2);
        model.cycle_detail_photo(true).await;
        assert_eq!(model.get_ui_state().await.detail.unwrap().photo_index, 0);

        model.close_detail().await;
        assert!(!model.is_detail_open().await);
    }

    #[tokio::test]
    async fn comments_are_taken_trimmed_and_cleared() {
        let model = AppModel::default();
        model.open_detail("2".to_string()).await;
        model.set_composing(true).await;
        assert_eq!(model.take_comment().await, None);

        for c in " lovely ".chars() {
            model.edit_comment(Some(c)).await;
        }
        model.toggle_detail_anonymous().await;
        assert_eq!(
            model.take_comment().await,
            Some(("2".to_string(), "lovely".to_string(), true))
        );
        let detail = model.get_ui_state().await.detail.unwrap();
        assert!(detail.comment.is_empty());
        assert!(!detail.composing);
    }

    #[tokio::test]
    async fn form_text_goes_to_the_focused_field() {
        let model = AppModel::default();
        for c in "Fort".chars() {
            model.edit_form_text(Some(c)).await;
        }
        model.move_form_focus(true).await;
        model.edit_form_text(Some('d')).await;
        model.edit_form_text(None).await;
        model.edit_form_text(Some('D')).await;

        let draft = model.get_form_draft().await;
        assert_eq!(draft.name, "Fort");
        assert_eq!(draft.description, "D");
    }

    #[tokio::test]
    async fn tips_commit_from_the_input_line() {
        let model = AppModel::default();
        model.ui_state.lock().await.form_field = FormField::Tips;
        assert!(!model.commit_tip().await);

        for c in "  Go early ".chars() {
            model.edit_form_text(Some(c)).await;
        }
        assert!(model.commit_tip().await);
        assert!(model.get_ui_state().await.tip_input.is_empty());
        assert_eq!(model.get_form_draft().await.tips, vec!["Go early"]);

        assert_eq!(model.remove_last_tip().await.as_deref(), Some("Go early"));
        assert_eq!(model.remove_last_tip().await, None);
    }

    #[tokio::test]
    async fn category_and_ratings_adjust_within_bounds() {
        let model = AppModel::default();
        model.cycle_form_category(false).await;
        assert_eq!(model.get_form_draft().await.category, Some(Category::Adventure));
        model.cycle_form_category(true).await;
        assert_eq!(model.get_form_draft().await.category, Some(Category::Adventure));
        model.cycle_form_category(false).await;
        assert_eq!(model.get_form_draft().await.category, Some(Category::Creative));

        for _ in 0..7 {
            model.adjust_rating(RatingKind::Safety, true).await;
        }
        model.adjust_rating(RatingKind::Vibe, false).await;
        let ratings = model.get_form_draft().await.ratings;
        assert_eq!(ratings.safety, 5);
        assert_eq!(ratings.vibe, 0);
    }

    #[tokio::test]
    async fn removing_photos_keeps_selection_valid() {
        let model = AppModel::default();
        {
            let mut draft = model.form.lock().await;
            draft.add_photo("a".to_string()).unwrap();
            draft.add_photo("b".to_string()).unwrap();
        }
        model.move_photo_selection(true).await;
        model.move_photo_selection(true).await;
        assert_eq!(model.get_ui_state().await.photo_selected, 1);

        assert_eq!(model.remove_selected_photo().await.as_deref(), Some("b"));
        assert_eq!(model.get_ui_state().await.photo_selected, 0);
        assert_eq!(model.remove_selected_photo().await.as_deref(), Some("a"));
        assert_eq!(model.remove_selected_photo().await, None);
    }

    #[tokio::test]
    async fn leaving_add_spot_discards_the_draft() {
        let model = AppModel::default();
        model.cycle_screen_forward().await;
        model.edit_form_text(Some('x')).await;
        model.move_form_focus(true).await;

        model.cycle_screen_forward().await;
        assert_eq!(model.get_ui_state().await.screen, Screen::Profile);
        let draft = model.get_form_draft().await;
        assert!(draft.name.is_empty());
        assert_eq!(draft.generation(), 1);
        assert_eq!(model.get_ui_state().await.form_field, FormField::Name);

        // leaving towards Spots discards too
        model.cycle_screen_backward().await;
        model.edit_form_text(Some('y')).await;
        model.cycle_screen_backward().await;
        model.cycle_screen_forward().await;
        assert!(model.get_form_draft().await.name.is_empty());
    }

    #[tokio::test]
    async fn edits_for_a_replaced_draft_are_dropped() {
        let model = AppModel::default();
        let stale = model.get_form_draft().await.generation();
        assert_eq!(model.edit_form_if(stale, |d| d.tips.push("early".to_string())).await, Some(()));

        model.cycle_screen_forward().await;
        model.cycle_screen_forward().await;
        assert_eq!(model.edit_form_if(stale, |d| d.tips.push("late".to_string())).await, None);
        assert!(!model.reset_form_if(stale).await);
        assert!(model.get_form_draft().await.tips.is_empty());

        let current = model.get_form_draft().await.generation();
        model.edit_form_if(current, |d| d.name.push('x')).await;
        assert!(model.reset_form_if(current).await);
        assert!(model.get_form_draft().await.name.is_empty());
    }

    #[tokio::test]
    async fn spots_are_found_by_id_regardless_of_filters() {
        let model = AppModel::default();
        for c in "nothing matches this".chars() {
            model.append_to_search(c).await;
        }
        assert!(model.get_discovery_view().await.results.is_empty());
        assert_eq!(model.spot("2").map(|s| s.id), Some("2".to_string()));
        assert_eq!(model.spot("missing"), None);
    }

    #[tokio::test]
    async fn profile_view_lists_spots() {
        let model = AppModel::default();
        let view = model.get_profile_view().await;
        assert_eq!(view.my_spots.len(), 3);
        assert_eq!(view.favorites.len(), 3);
        assert!(view.activity.is_empty());
    }
}
