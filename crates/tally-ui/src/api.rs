use std::rc::Rc;

use gloo::net::http::{
  Request,
  RequestBuilder,
  Response
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tally_shared::{
  CategoryCreate,
  CategoryDto,
  StatsDto,
  TaskCreate,
  TaskDto,
  TaskId,
  TaskPatch
};
use wasm_bindgen::JsCast;

use crate::config::{
  ClientConfig,
  CsrfConfig,
  Messages
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub enum Operation {
  LoadTasks,
  LoadCategories,
  LoadStats,
  AddTask,
  AddCategory,
  UpdateTask,
  DeleteTask
}

/// Failure of a single request. The
/// display text is the localized
/// message meant for the user.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  thiserror::Error,
)]
pub enum ApiError {
  #[error("{message}")]
  RequestFailed {
    operation: Operation,
    status:    Option<u16>,
    message:   String
  },
  #[error("{message}")]
  Malformed {
    operation: Operation,
    message:   String,
    detail:    String
  }
}

impl ApiError {
  pub fn operation(&self) -> Operation {
    match self {
      | Self::RequestFailed {
        operation,
        ..
      }
      | Self::Malformed {
        operation,
        ..
      } => *operation
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Delete
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Endpoint {
  ListTasks,
  ListCategories,
  Stats,
  CreateTask,
  CreateCategory,
  UpdateTask(TaskId),
  DeleteTask(TaskId)
}

impl Endpoint {
  pub fn method(self) -> HttpMethod {
    match self {
      | Self::ListTasks
      | Self::ListCategories
      | Self::Stats => HttpMethod::Get,
      | Self::CreateTask
      | Self::CreateCategory => {
        HttpMethod::Post
      }
      | Self::UpdateTask(_) => {
        HttpMethod::Put
      }
      | Self::DeleteTask(_) => {
        HttpMethod::Delete
      }
    }
  }

  pub fn path(self) -> String {
    match self {
      | Self::ListTasks
      | Self::CreateTask => {
        "/api/todos".to_string()
      }
      | Self::ListCategories
      | Self::CreateCategory => {
        "/api/categories".to_string()
      }
      | Self::Stats => {
        "/api/stats".to_string()
      }
      | Self::UpdateTask(id)
      | Self::DeleteTask(id) => {
        format!("/api/todos/{id}")
      }
    }
  }

  pub fn operation(self) -> Operation {
    match self {
      | Self::ListTasks => {
        Operation::LoadTasks
      }
      | Self::ListCategories => {
        Operation::LoadCategories
      }
      | Self::Stats => {
        Operation::LoadStats
      }
      | Self::CreateTask => {
        Operation::AddTask
      }
      | Self::CreateCategory => {
        Operation::AddCategory
      }
      | Self::UpdateTask(_) => {
        Operation::UpdateTask
      }
      | Self::DeleteTask(_) => {
        Operation::DeleteTask
      }
    }
  }

  pub fn mutates(self) -> bool {
    self.method() != HttpMethod::Get
  }
}

/// Extra headers for a request. Only
/// mutating requests carry the JSON
/// content type and the anti-forgery
/// token.
pub fn request_headers(
  endpoint: Endpoint,
  csrf_token: Option<&str>,
  csrf: &CsrfConfig
) -> Vec<(String, String)> {
  if !endpoint.mutates() {
    return Vec::new();
  }

  let mut headers = vec![(
    "Content-Type".to_string(),
    "application/json".to_string()
  )];
  match csrf_token {
    | Some(token) => {
      headers.push((
        csrf.header.clone(),
        token.to_string()
      ))
    }
    | None => {
      tracing::warn!(
        cookie = %csrf.cookie,
        endpoint = ?endpoint,
        "no anti-forgery cookie; \
         sending mutation without \
         token"
      );
    }
  }
  headers
}

/// Value of cookie `name` in a
/// `document.cookie` string.
pub fn cookie_value(
  cookies: &str,
  name: &str
) -> Option<String> {
  cookies
    .split(';')
    .filter_map(|pair| {
      pair.trim().split_once('=')
    })
    .find(|(key, _)| *key == name)
    .map(|(_, value)| value.to_string())
}

/// One call per operation against the
/// task service.
#[allow(async_fn_in_trait)]
pub trait Gateway {
  async fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, ApiError>;

  async fn list_categories(
    &self
  ) -> Result<Vec<CategoryDto>, ApiError>;

  async fn get_stats(
    &self
  ) -> Result<StatsDto, ApiError>;

  async fn create_task(
    &self,
    data: &TaskCreate
  ) -> Result<(), ApiError>;

  async fn create_category(
    &self,
    data: &CategoryCreate
  ) -> Result<(), ApiError>;

  async fn update_task(
    &self,
    id: TaskId,
    patch: &TaskPatch
  ) -> Result<(), ApiError>;

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), ApiError>;
}

/// `Gateway` over `fetch`.
pub struct HttpGateway {
  config:   Rc<ClientConfig>,
  messages: Messages
}

impl HttpGateway {
  pub fn new(
    config: Rc<ClientConfig>,
    messages: Messages
  ) -> Self {
    Self { config, messages }
  }

  fn failed(
    &self,
    operation: Operation,
    status: Option<u16>
  ) -> ApiError {
    ApiError::RequestFailed {
      operation,
      status,
      message: self
        .messages
        .failure(operation)
        .to_string()
    }
  }

  fn builder(
    &self,
    endpoint: Endpoint
  ) -> RequestBuilder {
    let url =
      self.config.url(&endpoint.path());
    let builder = match endpoint.method()
    {
      | HttpMethod::Get => {
        Request::get(&url)
      }
      | HttpMethod::Post => {
        Request::post(&url)
      }
      | HttpMethod::Put => {
        Request::put(&url)
      }
      | HttpMethod::Delete => {
        Request::delete(&url)
      }
    };

    // Read per call so a rotated token
    // is always honored.
    let token = if endpoint.mutates() {
      document_cookie().and_then(
        |cookies| {
          cookie_value(
            &cookies,
            &self.config.csrf.cookie
          )
        }
      )
    } else {
      None
    };

    request_headers(
      endpoint,
      token.as_deref(),
      &self.config.csrf
    )
    .into_iter()
    .fold(builder, |builder, (name, value)| {
      builder.header(&name, &value)
    })
  }

  async fn send<B>(
    &self,
    endpoint: Endpoint,
    body: Option<&B>
  ) -> Result<Response, ApiError>
  where
    B: Serialize + ?Sized
  {
    let operation = endpoint.operation();
    let builder = self.builder(endpoint);

    let sent = match body {
      | Some(body) => {
        let request =
          builder.json(body).map_err(
            |err| {
              tracing::error!(
                error = %err,
                ?operation,
                "failed encoding request body"
              );
              self.failed(operation, None)
            }
          )?;
        request.send().await
      }
      | None => builder.send().await
    };

    let response =
      sent.map_err(|err| {
        tracing::warn!(
          error = %err,
          ?operation,
          "request did not complete"
        );
        self.failed(operation, None)
      })?;

    if !response.ok() {
      tracing::warn!(
        status = response.status(),
        ?operation,
        "request rejected"
      );
      return Err(self.failed(
        operation,
        Some(response.status())
      ));
    }

    Ok(response)
  }

  async fn fetch_json<T>(
    &self,
    endpoint: Endpoint
  ) -> Result<T, ApiError>
  where
    T: DeserializeOwned
  {
    let operation = endpoint.operation();
    let response = self
      .send::<()>(endpoint, None)
      .await?;

    response.json::<T>().await.map_err(
      |err| {
        tracing::warn!(
          error = %err,
          ?operation,
          "unexpected response shape"
        );
        ApiError::Malformed {
          operation,
          message: self
            .messages
            .failure(operation)
            .to_string(),
          detail: err.to_string()
        }
      }
    )
  }
}

impl Gateway for HttpGateway {
  async fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, ApiError> {
    self
      .fetch_json(Endpoint::ListTasks)
      .await
  }

  async fn list_categories(
    &self
  ) -> Result<Vec<CategoryDto>, ApiError>
  {
    self
      .fetch_json(
        Endpoint::ListCategories
      )
      .await
  }

  async fn get_stats(
    &self
  ) -> Result<StatsDto, ApiError> {
    self.fetch_json(Endpoint::Stats).await
  }

  async fn create_task(
    &self,
    data: &TaskCreate
  ) -> Result<(), ApiError> {
    self
      .send(Endpoint::CreateTask, Some(data))
      .await
      .map(|_| ())
  }

  async fn create_category(
    &self,
    data: &CategoryCreate
  ) -> Result<(), ApiError> {
    self
      .send(
        Endpoint::CreateCategory,
        Some(data)
      )
      .await
      .map(|_| ())
  }

  async fn update_task(
    &self,
    id: TaskId,
    patch: &TaskPatch
  ) -> Result<(), ApiError> {
    self
      .send(
        Endpoint::UpdateTask(id),
        Some(patch)
      )
      .await
      .map(|_| ())
  }

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), ApiError> {
    self
      .send::<()>(
        Endpoint::DeleteTask(id),
        None
      )
      .await
      .map(|_| ())
  }
}

fn document_cookie() -> Option<String> {
  web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .and_then(|document| {
      document
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
    })
    .and_then(|document| {
      document.cookie().ok()
    })
}
