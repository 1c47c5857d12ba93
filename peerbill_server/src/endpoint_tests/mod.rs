mod gateway;
mod grpc;
mod helpers;
mod websocket;
