//! Mock Moodle portal shared by the integration tests.

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use moodle_fetch::config::Config;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "student";
pub const PASSWORD: &str = "hunter22";
pub const LOGIN_TOKEN: &str = "tok-8f3a";

/// A wiremock server answering like a small Moodle site.
pub struct MockMoodle {
    pub server: MockServer,
}

impl MockMoodle {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Login page with a token, and a POST that redirects to `/my/`.
    pub async fn mount_login(&self) {
        Mock::given(method("GET"))
            .and(path("/login/index.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"<html><body><form method="post">
                   <input type="hidden" name="logintoken" value="{}">
                   <input name="username"><input name="password" type="password">
                   </form></body></html>"#,
                LOGIN_TOKEN
            )))
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/login/index.php"))
            .respond_with(
                ResponseTemplate::new(303).insert_header("Location", format!("{}/my/", self.uri())),
            )
            .mount(&self.server)
            .await;
    }

    /// Login POST that stays on the login page, as Moodle does for bad credentials.
    pub async fn mount_rejected_login(&self) {
        Mock::given(method("POST"))
            .and(path("/login/index.php"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><div class=\"loginerrors\">Invalid login</div></body></html>"),
            )
            .mount(&self.server)
            .await;
    }

    /// Dashboard listing `(name, id)` courses under the "My courses" heading.
    pub async fn mount_dashboard(&self, courses: &[(&str, u32)]) {
        let items: String = courses
            .iter()
            .map(|(name, id)| {
                format!(
                    r#"<li class="type_course depth_3 collapsed contains_branch">
                         <p class="tree_item branch"><a href="{}/course/view.php?id={}">{}</a></p>
                       </li>"#,
                    self.uri(),
                    id,
                    name
                )
            })
            .collect();

        let body = format!(
            r#"<html><body>
               <nav><a href="/my/">Dashboard</a></nav>
               <div class="block_navigation">
                 <ul><li><p>My courses</p>
                   <ul>{}</ul>
                 </li></ul>
               </div>
               </body></html>"#,
            items
        );

        Mock::given(method("GET"))
            .and(path("/my/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Course content page whose single topic section holds `links`.
    pub async fn mount_course(&self, id: u32, links: &[&str]) {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();

        let body = format!(
            r#"<html><body>
               <div class="course-content"><ul class="topics">
                 <li id="section-0" class="section main clearfix">{}</li>
               </ul></div>
               </body></html>"#,
            anchors
        );

        Mock::given(method("GET"))
            .and(path("/course/view.php"))
            .and(query_param("id", id.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Course content page answering with a server error.
    pub async fn mount_broken_course(&self, id: u32) {
        Mock::given(method("GET"))
            .and(path("/course/view.php"))
            .and(query_param("id", id.to_string()))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Resource view redirecting to its file, and the file itself.
    pub async fn mount_resource(&self, id: u32, filename: &str, body: &[u8]) {
        let file_path = format!("/pluginfile.php/{}/mod_resource/content/1/{}", id, filename);
        self.mount_redirect(id, &file_path).await;
        self.mount_file(&file_path, body, Duration::ZERO).await;
    }

    /// Several resource views redirecting to one slow file.
    pub async fn mount_shared_file(&self, ids: &[u32], filename: &str, body: &[u8], delay: Duration) {
        let file_path = format!("/pluginfile.php/0/mod_resource/content/1/{}", filename);
        for id in ids {
            self.mount_redirect(*id, &file_path).await;
        }
        self.mount_file(&file_path, body, delay).await;
    }

    async fn mount_redirect(&self, id: u32, file_path: &str) {
        Mock::given(method("GET"))
            .and(path("/mod/resource/view.php"))
            .and(query_param("id", id.to_string()))
            .respond_with(
                ResponseTemplate::new(303)
                    .insert_header("Location", format!("{}{}", self.uri(), file_path)),
            )
            .mount(&self.server)
            .await;
    }

    async fn mount_file(&self, file_path: &str, body: &[u8], delay: Duration) {
        Mock::given(method("GET"))
            .and(path(file_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(body.to_vec())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Link to a resource view, relative to the site root.
    pub fn resource_link(id: u32) -> String {
        format!("/mod/resource/view.php?id={}", id)
    }

    /// Configuration pointing at this server and writing below `root`.
    pub fn config(&self, root: &Path) -> Config {
        let mut config = Config::default();
        config.auth.username = USERNAME.to_string();
        config.auth.password = PASSWORD.to_string();
        config.auth.url = format!("{}/login/index.php", self.uri());
        config.options.download_directory = Some(root.join("courses"));
        config.options.download_timeout_seconds = 5;
        config.options.course_concurrency = 2;
        config.options.download_concurrency = 2;
        config
    }
}

/// Plain HTTP file server that records how many requests it serves at once.
///
/// Every response is held for `hold` and closes its connection, so each
/// download is one request on its own connection.
pub struct CountingFileServer {
    addr: SocketAddr,
    peak: Arc<AtomicUsize>,
    served: Arc<AtomicUsize>,
}

impl CountingFileServer {
    pub async fn start(hold: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let served = Arc::new(AtomicUsize::new(0));

        let (flight, top, count) = (in_flight, Arc::clone(&peak), Arc::clone(&served));
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let (flight, top, count) = (Arc::clone(&flight), Arc::clone(&top), Arc::clone(&count));
                tokio::spawn(async move {
                    let mut request = [0u8; 4096];
                    let Ok(n) = socket.read(&mut request).await else {
                        return;
                    };
                    let request = String::from_utf8_lossy(&request[..n]).into_owned();
                    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                    let now = flight.fetch_add(1, Ordering::SeqCst) + 1;
                    top.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(hold).await;

                    // Leave before answering so the client cannot start its next request first
                    flight.fetch_sub(1, Ordering::SeqCst);
                    count.fetch_add(1, Ordering::SeqCst);

                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        target.len(),
                        target
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, peak, served }
    }

    /// Absolute link to the `n`th file.
    pub fn link(&self, n: u32) -> String {
        format!(
            "http://{}/pluginfile.php/{}/mod_resource/content/1/file{}.pdf",
            self.addr, n, n
        )
    }

    /// Most requests ever served at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

/// Formatted log output collected in memory.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's `tracing` events into the capture until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::set_default(subscriber)
    }

    /// Number of captured lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
