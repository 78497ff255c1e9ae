//! The `Core` session façade.
//!
//! `Core` owns exactly one connection engine for its whole life. It drives
//! the engine through login, attach and logout, keeps track of who the
//! current user is and which rooms are joined, and turns everything the
//! engine reports into [`CoreEvent`]s.

use parley_protocol::jid::{bare_jid, login_jid, node_from_jid, parse_jid};
use parley_protocol::{Element, Namespaces, StanzaMatcher, ns, stanza};
use parley_room::{ChatRoom, RoomRegistry};
use parley_session::{Autojoin, ChatUser, Login, Options, OptionsOverride, anonymous_flag};
use parley_transport::{Connection, HandlerRef};
use tokio::sync::mpsc;

use crate::CoreError;
use crate::event::{
    CoreEvent, EventReceiver, EventSender, StanzaKind, stanza_forwarder, status_forwarder,
};
use crate::logging::RawLog;

/// Namespaces the core registers on top of the engine built-ins.
const EXTRA_NAMESPACES: [(&str, &str); 4] = [
    ("PRIVATE", ns::PRIVATE),
    ("BOOKMARKS", ns::BOOKMARKS),
    ("PRIVACY", ns::PRIVACY),
    ("DELAY", ns::DELAY),
];

/// Session core for one chat client.
///
/// # Example
///
/// ```rust,ignore
/// let (mut core, mut events) = Core::<Bosh>::init(
///     "https://chat.example.com/http-bind/",
///     OptionsOverride::default().debug(true),
/// )?;
/// core.connect(Some("example.com"), None, Some("guest"))?;
/// ```
pub struct Core<C: Connection> {
    service: String,
    connection: C,
    user: Option<ChatUser>,
    rooms: RoomRegistry,
    anonymous: bool,
    options: Options,
    namespaces: Namespaces,
    events: EventSender,
    default_handlers: Vec<HandlerRef>,
}

impl<C: Connection> Core<C> {
    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Creates the core and its connection for `service`.
    ///
    /// Returns the receiving end of the event channel alongside the core.
    ///
    /// # Errors
    /// - [`CoreError::InvalidService`] if `service` is empty
    /// - [`CoreError::Transport`] if the engine refuses the endpoint
    pub fn init(
        service: &str,
        overrides: OptionsOverride,
    ) -> Result<(Self, EventReceiver), CoreError> {
        if service.trim().is_empty() {
            return Err(CoreError::InvalidService);
        }

        let options = Options::with_overrides(overrides);
        if options.debug {
            tracing::info!(service, "debugging enabled");
        }

        let mut namespaces = Namespaces::new();
        for (name, uri) in EXTRA_NAMESPACES {
            namespaces.add(name, uri);
        }

        let mut connection = C::open(service)?;
        connection.set_raw_hooks(RawLog::new(options.debug).hooks());

        let (events, receiver) = mpsc::unbounded_channel();
        let core = Self {
            service: service.to_string(),
            connection,
            user: None,
            rooms: RoomRegistry::new(),
            anonymous: false,
            options,
            namespaces,
            events,
            default_handlers: Vec::new(),
        };
        Ok((core, receiver))
    }

    /// Starts a login.
    ///
    /// Which procedure runs depends on the arguments (empty strings count
    /// as missing):
    ///
    /// - JID and password: log in as that user
    /// - host and nick: anonymous login to the host
    /// - JID only: emit [`CoreEvent::Login`] with the JID preset
    /// - nothing: emit [`CoreEvent::Login`] without a preset
    ///
    /// The connection is reset first in every case.
    pub fn connect(
        &mut self,
        jid_or_host: Option<&str>,
        password: Option<&str>,
        nick: Option<&str>,
    ) -> Result<(), CoreError> {
        self.connection.reset();
        self.register_default_handlers();
        self.anonymous = anonymous_flag(self.anonymous, jid_or_host);

        let login = Login::classify(jid_or_host, password, nick);
        tracing::info!(?login, anonymous = self.anonymous, "connect");

        match login {
            Login::Authenticated { jid, password } => {
                let full = login_jid(&jid, &self.options.resource)?;
                self.connection.connect(
                    &full,
                    Some(password.as_str()),
                    status_forwarder(self.events.clone()),
                )?;
                self.user = Some(ChatUser::new(Some(&jid), node_from_jid(&jid)));
            }
            Login::Anonymous { host, nick } => {
                let full = login_jid(&host, &self.options.resource)?;
                self.connection
                    .connect(&full, None, status_forwarder(self.events.clone()))?;
                self.user = Some(ChatUser::new(None, Some(&nick)));
            }
            Login::PromptPassword { jid } => self.emit(CoreEvent::Login {
                preset_jid: Some(jid),
            }),
            Login::PromptCredentials => self.emit(CoreEvent::Login { preset_jid: None }),
        }
        Ok(())
    }

    /// Resumes a session that was bound elsewhere (e.g. by a web backend).
    ///
    /// Unlike [`connect`](Self::connect) this does not reset the connection.
    /// The user is only recorded once the engine accepts the attach.
    pub fn attach(&mut self, jid: &str, sid: &str, rid: u64) -> Result<(), CoreError> {
        let parsed = parse_jid(jid)?;
        self.register_default_handlers();

        tracing::info!(%parsed, sid, rid, "attach");
        self.connection
            .attach(&parsed, sid, rid, status_forwarder(self.events.clone()))?;
        self.user = Some(ChatUser::new(Some(jid), node_from_jid(jid)));
        Ok(())
    }

    /// Leaves every joined room and ends the session.
    ///
    /// Does nothing when the connection is not up.
    pub fn disconnect(&mut self) {
        if !self.connection.is_connected() {
            tracing::debug!("disconnect ignored, not connected");
            return;
        }

        let from = self.connection.jid().map(str::to_string);
        for room in self.rooms.iter() {
            let id = self.connection.unique_id("leave");
            let presence = match room.leave_presence(from.as_deref(), &id, None) {
                Ok(presence) => presence,
                Err(err) => {
                    tracing::warn!(room = %room.jid(), %err, "not leaving room");
                    continue;
                }
            };
            if let Err(err) = self.connection.send(presence) {
                tracing::warn!(room = %room.jid(), %err, "leave presence not sent");
            }
        }

        tracing::info!(rooms = self.rooms.len(), "disconnect");
        self.connection.disconnect();
    }

    /// Shuts the session down while the host is going away.
    ///
    /// The engine is switched to synchronous requests so the leave
    /// presences and the logout make it out before the process ends.
    pub fn on_unload(&mut self) {
        self.connection.set_sync(true);
        self.disconnect();
        self.connection.flush();
    }

    /// Finishes login once the engine reports `Connected`.
    ///
    /// Adopts the JID the server bound if the user has none yet (anonymous
    /// logins), then joins rooms according to [`Options::autojoin`].
    pub fn on_connected(&mut self) -> Result<(), CoreError> {
        if let Some(bound) = self.connection.jid().map(str::to_string) {
            let user = self.user.get_or_insert_with(ChatUser::default);
            if user.jid().is_none() {
                tracing::debug!(jid = %bound, "adopting bound JID");
                user.set_jid(&bound);
            }
        }

        match self.options.autojoin.clone() {
            Autojoin::Bookmarks => {
                let id = self.connection.unique_id("bookmarks");
                tracing::debug!(%id, "requesting bookmarks");
                self.connection.send(stanza::bookmarks_request(&id))?;
            }
            Autojoin::Rooms(rooms) => self.join_rooms(&rooms)?,
            Autojoin::Disabled => {}
        }
        Ok(())
    }

    fn join_rooms(&mut self, rooms: &[String]) -> Result<(), CoreError> {
        let Some(nick) = self.user.as_ref().and_then(ChatUser::nick).map(str::to_string) else {
            tracing::warn!(rooms = rooms.len(), "autojoin skipped, no nick");
            return Ok(());
        };
        let from = self.connection.jid().map(str::to_string);

        for room in rooms {
            let to = format!("{}/{nick}", bare_jid(room));
            let id = self.connection.unique_id("join");
            tracing::debug!(%to, "autojoin");
            self.connection
                .send(stanza::join_presence(from.as_deref(), &to, &id, None))?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    /// Registers a stanza handler with the engine.
    ///
    /// The handler stays registered until it returns `false`, the
    /// connection is reset or [`delete_handler`](Self::delete_handler)
    /// is called.
    pub fn add_handler(
        &mut self,
        matcher: StanzaMatcher,
        handler: impl FnMut(&Element) -> bool + Send + 'static,
    ) -> HandlerRef {
        let handler_ref = self.connection.add_handler(matcher, Box::new(handler));
        tracing::debug!(handler = %handler_ref, "handler added");
        handler_ref
    }

    pub fn delete_handler(&mut self, handler: HandlerRef) {
        self.connection.delete_handler(handler);
    }

    fn register_default_handlers(&mut self) {
        for handler in self.default_handlers.drain(..) {
            self.connection.delete_handler(handler);
        }
        for kind in StanzaKind::ALL {
            let handler = stanza_forwarder(kind, self.events.clone());
            let handler_ref = self.connection.add_handler(kind.matcher(), handler);
            self.default_handlers.push(handler_ref);
        }
        tracing::debug!(count = self.default_handlers.len(), "default handlers registered");
    }

    fn emit(&self, event: CoreEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("event dropped, no receiver");
        }
    }

    // -----------------------------------------------------------------------
    // Raw traffic
    // -----------------------------------------------------------------------

    /// Logs received data when debugging is enabled.
    pub fn raw_input(&self, data: &str) {
        RawLog::new(self.options.debug).input(data);
    }

    /// Logs sent data when debugging is enabled.
    pub fn raw_output(&self, data: &str) {
        RawLog::new(self.options.debug).output(data);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn user(&self) -> Option<&ChatUser> {
        self.user.as_ref()
    }

    pub fn user_mut(&mut self) -> Option<&mut ChatUser> {
        self.user.as_mut()
    }

    pub fn set_user(&mut self, user: ChatUser) {
        self.user = Some(user);
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Companion code registers and unregisters joined rooms through this.
    pub fn rooms_mut(&mut self) -> &mut RoomRegistry {
        &mut self.rooms
    }

    /// Looks up a joined room by JID.
    pub fn room(&self, jid: &str) -> Option<&ChatRoom> {
        self.rooms.find(jid)
    }

    /// `true` once any `connect` has been given a bare host.
    pub fn is_anonymous_connection(&self) -> bool {
        self.anonymous
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    pub fn add_namespace(&mut self, name: &str, value: &str) {
        self.namespaces.add(name, value);
    }
}
