mod derivative_tests;
mod rendering_tests;
mod tensor_tests;
