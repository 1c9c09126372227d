//! Verb helpers that assemble an [`OutgoingRequest`](crate::http::OutgoingRequest) and feed it
//! through [`AuthHttp::request`].

// self
use crate::{
	_prelude::*,
	client::{AuthHttp, RequestResult},
	http::{HttpTransport, RequestOptions},
};

impl<T> AuthHttp<T>
where
	T: ?Sized + HttpTransport,
{
	/// Sends a `GET` request.
	pub async fn get(&self, url: &str, options: Option<RequestOptions>) -> RequestResult<T> {
		self.request(self.build_request(Method::GET, url, Vec::new(), options)).await
	}

	/// Sends a `POST` request with `body`.
	pub async fn post(
		&self,
		url: &str,
		body: impl Into<Vec<u8>>,
		options: Option<RequestOptions>,
	) -> RequestResult<T> {
		self.request(self.build_request(Method::POST, url, body.into(), options)).await
	}

	/// Sends a `PUT` request with `body`.
	pub async fn put(
		&self,
		url: &str,
		body: impl Into<Vec<u8>>,
		options: Option<RequestOptions>,
	) -> RequestResult<T> {
		self.request(self.build_request(Method::PUT, url, body.into(), options)).await
	}

	/// Sends a `DELETE` request.
	pub async fn delete(&self, url: &str, options: Option<RequestOptions>) -> RequestResult<T> {
		self.request(self.build_request(Method::DELETE, url, Vec::new(), options)).await
	}

	/// Sends a `PATCH` request with `body`.
	pub async fn patch(
		&self,
		url: &str,
		body: impl Into<Vec<u8>>,
		options: Option<RequestOptions>,
	) -> RequestResult<T> {
		self.request(self.build_request(Method::PATCH, url, body.into(), options)).await
	}

	/// Sends a `HEAD` request.
	pub async fn head(&self, url: &str, options: Option<RequestOptions>) -> RequestResult<T> {
		self.request(self.build_request(Method::HEAD, url, Vec::new(), options)).await
	}

	/// Sends an `OPTIONS` request.
	pub async fn options(&self, url: &str, options: Option<RequestOptions>) -> RequestResult<T> {
		self.request(self.build_request(Method::OPTIONS, url, Vec::new(), options)).await
	}
}
